//! Adapters between the domain model and external representations.

pub mod records;

pub use records::{
    RecordError, SubtaskEdgeRecord, SubtaskNodeRecord, TaskRecord, TaskStepRecord, decode_tasks,
    encode_tasks,
};
