pub mod task {
    pub mod v1 {
        include!("generated/task.v1.rs");
    }
}
