//! v3 resource clients.

pub mod tasks;

pub use tasks::{
    CancelTaskRequest, CreateTaskRequest, GetTaskRequest, ListTasksRequest, Task, TaskResult,
    TaskSpec, TaskState, Tasks,
};
