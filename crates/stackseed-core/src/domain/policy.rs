//! Per-path conflict decisions.
//!
//! The builder asks before every create. Directories are idempotent; files
//! are never overwritten.

/// What is on disk at a path the builder is about to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistingEntry {
    Absent,
    Directory,
    /// A regular file, symlink or anything else that is not a directory.
    File,
}

/// What the catalog declares at that path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredEntry {
    Directory,
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Write,
    Skip,
    /// Stop the run; the existing entry is left untouched.
    Abort,
}

pub struct ConflictPolicy;

impl ConflictPolicy {
    pub const fn decide(declared: DeclaredEntry, existing: ExistingEntry) -> Decision {
        match (declared, existing) {
            (_, ExistingEntry::Absent) => Decision::Write,
            (DeclaredEntry::Directory, ExistingEntry::Directory) => Decision::Skip,
            (_, ExistingEntry::File) | (DeclaredEntry::File, ExistingEntry::Directory) => {
                Decision::Abort
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_paths_are_written() {
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::Directory, ExistingEntry::Absent),
            Decision::Write
        );
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::File, ExistingEntry::Absent),
            Decision::Write
        );
    }

    #[test]
    fn redeclared_directory_is_skipped() {
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::Directory, ExistingEntry::Directory),
            Decision::Skip
        );
    }

    #[test]
    fn existing_files_always_abort() {
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::File, ExistingEntry::File),
            Decision::Abort
        );
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::Directory, ExistingEntry::File),
            Decision::Abort
        );
    }

    #[test]
    fn directory_in_place_of_file_aborts() {
        assert_eq!(
            ConflictPolicy::decide(DeclaredEntry::File, ExistingEntry::Directory),
            Decision::Abort
        );
    }
}
