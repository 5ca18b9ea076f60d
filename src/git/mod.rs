mod repo;
mod runner;
mod status;

pub use repo::GitRepo;
pub use runner::{CommandRunner, SystemRunner};
pub use status::{
    ChangeStatus, STAGED_STATUS_ARGS, StagedFile, StatusEntry, parse_name_status,
    parse_staged_files, staged_files,
};

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
