#[path = "commands/add.rs"]
pub mod topic_add;
#[path = "commands/replace.rs"]
pub mod topic_replace;
#[path = "commands/rm.rs"]
pub mod topic_rm;
