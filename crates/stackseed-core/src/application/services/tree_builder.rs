//! Tree Builder - materializes resolved descriptor sets under a root.
//!
//! Order of work:
//! 1. Claim the root (create it, or reuse it if it is an empty directory)
//! 2. Frontend set, then backend set, in descriptor order
//! 3. `log/` and its three files, then flush the audit logger
//!
//! A failure after step 1 stops all further writes. Nothing written so far
//! is removed; the audit log is flushed so it explains how far the run got.

use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
        services::AuditLogger,
    },
    domain::{
        BuildResult, CatalogResolution, ConflictPolicy, Decision, DeclaredEntry, ExistingEntry,
        LogStream, ProjectConfig, RelativePath, RenderContext, TemplateDescriptor, TemplateSet,
    },
    error::{StackseedError, StackseedResult},
};

/// Name of the audit log directory under the project root.
pub const LOG_DIR: &str = "log";

pub struct TreeBuilder<'a> {
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
    logger: &'a mut AuditLogger,
    /// Streams whose log file this run created. Only these are appended to.
    owned_logs: Vec<LogStream>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        filesystem: &'a dyn Filesystem,
        logger: &'a mut AuditLogger,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            logger,
            owned_logs: Vec::with_capacity(LogStream::ALL.len()),
        }
    }

    /// Build the whole tree under `root`.
    ///
    /// `RootAlreadyExists` is returned before anything is written or
    /// flushed. Any later error is logged to the stream it happened in and
    /// to `setup`, the logger is flushed best-effort, and the error is
    /// returned.
    #[instrument(
        skip_all,
        fields(root = %root.display(), variant = %config.variant(), run_id = %self.logger.run_id())
    )]
    pub fn build(
        &mut self,
        root: &Path,
        resolution: &CatalogResolution,
        config: &ProjectConfig,
    ) -> StackseedResult<BuildResult> {
        self.logger.info(
            LogStream::Setup,
            format!(
                "Starting setup run {} for '{}': {}, database '{}'",
                self.logger.run_id(),
                config.name(),
                config.variant(),
                config.database_name()
            ),
        );

        let mut result = BuildResult {
            root_created: self.claim_root(root)?,
            ..BuildResult::default()
        };

        match self.build_claimed(root, resolution, config, &mut result) {
            Ok(()) => Ok(result),
            Err(e) => {
                self.logger
                    .error(LogStream::Setup, format!("Setup aborted: {e}"));
                self.flush_after_failure(root);
                Err(e)
            }
        }
    }

    fn claim_root(&mut self, root: &Path) -> StackseedResult<bool> {
        let existing = self.filesystem.entry_kind(root)?;

        if existing == ExistingEntry::Absent {
            self.filesystem.create_dir_all(root)?;
            self.logger.info(
                LogStream::Setup,
                format!("Created project root {}", root.display()),
            );
            return Ok(true);
        }

        if existing == ExistingEntry::Directory && self.filesystem.is_empty_dir(root)? {
            self.logger.info(
                LogStream::Setup,
                format!("Using existing empty project root {}", root.display()),
            );
            return Ok(false);
        }

        Err(ApplicationError::RootAlreadyExists {
            path: root.to_path_buf(),
        }
        .into())
    }

    fn build_claimed(
        &mut self,
        root: &Path,
        resolution: &CatalogResolution,
        config: &ProjectConfig,
        result: &mut BuildResult,
    ) -> StackseedResult<()> {
        let context = RenderContext::from_config(config);

        self.build_set(root, &resolution.frontend, &context, result, |_| {})?;
        self.build_set(root, &resolution.backend, &context, result, |logger| {
            logger.info(
                LogStream::Backend,
                format!(
                    "Database setup file created for {} with name '{}'",
                    config.database().display_name(),
                    config.database_name()
                ),
            );
        })?;

        self.create_log_files(root, result)?;

        self.logger.info(
            LogStream::Setup,
            format!(
                "Setup completed successfully: {} paths created, {} skipped",
                result.created_count(),
                result.skipped_count()
            ),
        );
        self.logger
            .flush(self.filesystem, &root.join(LOG_DIR))
    }

    /// Process one component's descriptors in order.
    ///
    /// `finish` runs after the last descriptor, before the end milestone.
    fn build_set(
        &mut self,
        root: &Path,
        set: &TemplateSet,
        context: &RenderContext,
        result: &mut BuildResult,
        finish: impl FnOnce(&mut AuditLogger),
    ) -> StackseedResult<()> {
        let component = set.component();
        let stream = component.stream();

        self.logger.info(
            LogStream::Setup,
            format!(
                "Starting {component} setup ({} files, {} directories)",
                set.file_count(),
                set.directory_count()
            ),
        );

        for descriptor in set {
            if let Err(e) = self.apply(root, descriptor, context, stream, result) {
                self.logger.error(
                    stream,
                    format!("Failed at {}: {e}", descriptor.path),
                );
                return Err(e);
            }
        }

        finish(&mut *self.logger);
        self.logger
            .info(LogStream::Setup, format!("Finished {component} setup"));
        Ok(())
    }

    fn apply(
        &mut self,
        root: &Path,
        descriptor: &TemplateDescriptor,
        context: &RenderContext,
        stream: LogStream,
        result: &mut BuildResult,
    ) -> StackseedResult<()> {
        let target = descriptor.path.to_native(root);

        if descriptor.is_directory() {
            return self.ensure_directory(root, &descriptor.path, stream, result);
        }

        let rendered = self.renderer.render(descriptor, context).map_err(|e| {
            StackseedError::from(ApplicationError::TemplateRenderDefect {
                path: descriptor.path.to_string(),
                reason: e.to_string(),
            })
        })?;

        let existing = self.filesystem.entry_kind(&target)?;
        match ConflictPolicy::decide(DeclaredEntry::File, existing) {
            Decision::Write => {
                self.filesystem.write_new_file(&target, &rendered.bytes)?;
                self.logger.info(
                    stream,
                    format!("Created file {} ({} bytes)", descriptor.path, rendered.len()),
                );
                result.created(descriptor.path.clone());
                Ok(())
            }
            Decision::Skip | Decision::Abort => {
                Err(ApplicationError::UnexpectedExistingFile { path: target }.into())
            }
        }
    }

    fn ensure_directory(
        &mut self,
        root: &Path,
        path: &RelativePath,
        stream: LogStream,
        result: &mut BuildResult,
    ) -> StackseedResult<()> {
        let target = path.to_native(root);
        let existing = self.filesystem.entry_kind(&target)?;

        match ConflictPolicy::decide(DeclaredEntry::Directory, existing) {
            Decision::Write => {
                self.filesystem.create_dir_all(&target)?;
                self.logger
                    .info(stream, format!("Created directory {path}"));
                result.created(path.clone());
            }
            Decision::Skip => {
                self.logger
                    .info(stream, format!("Skipped directory {path} (already present)"));
                result.skipped(path.clone());
            }
            Decision::Abort => {
                return Err(ApplicationError::UnexpectedExistingFile { path: target }.into());
            }
        }
        Ok(())
    }

    /// `log/` and empty `setup.log`, `frontend.log`, `backend.log`.
    ///
    /// The files are created here so a pre-existing one aborts the run like
    /// any other file; `flush` then appends to them.
    fn create_log_files(&mut self, root: &Path, result: &mut BuildResult) -> StackseedResult<()> {
        let log_dir = RelativePath::new(LOG_DIR);
        self.ensure_directory(root, &log_dir, LogStream::Setup, result)?;

        for stream in LogStream::ALL {
            let path = log_dir.join(stream.file_name())?;
            let target = path.to_native(root);

            let existing = self.filesystem.entry_kind(&target)?;
            if ConflictPolicy::decide(DeclaredEntry::File, existing) != Decision::Write {
                return Err(ApplicationError::UnexpectedExistingFile { path: target }.into());
            }
            self.filesystem.write_new_file(&target, &[])?;
            self.owned_logs.push(stream);
            self.logger
                .info(LogStream::Setup, format!("Created log file {path}"));
            result.created(path);
        }
        Ok(())
    }

    /// Flush into `log/` after an abort.
    ///
    /// Log files this run has not created yet are created new. A file that
    /// was already there belongs to someone else: its stream is not written.
    fn flush_after_failure(&mut self, root: &Path) {
        let log_dir = root.join(LOG_DIR);
        if let Err(e) = self.filesystem.create_dir_all(&log_dir) {
            warn!(error = %e, path = %log_dir.display(), "Could not create log directory");
            return;
        }

        for stream in LogStream::ALL {
            if self.owned_logs.contains(&stream) {
                continue;
            }
            let target = log_dir.join(stream.file_name());
            let claimed = match self.filesystem.entry_kind(&target) {
                Ok(ExistingEntry::Absent) => self.filesystem.write_new_file(&target, &[]),
                Ok(_) => Err(ApplicationError::UnexpectedExistingFile {
                    path: target.clone(),
                }
                .into()),
                Err(e) => Err(e),
            };
            match claimed {
                Ok(()) => self.owned_logs.push(stream),
                Err(e) => warn!(
                    stream = %stream,
                    error = %e,
                    path = %target.display(),
                    "Leaving log file untouched; entries for this stream are not written"
                ),
            }
        }

        let streams = self.owned_logs.clone();
        match self
            .logger
            .flush_streams(self.filesystem, &log_dir, &streams)
        {
            Ok(()) => debug!(path = %log_dir.display(), "Flushed audit log after failure"),
            Err(e) => warn!(error = %e, "Audit log incomplete after failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{
        BackendFramework, Component, DatabaseKind, DomainError, RenderedFile, TemplateSet,
    };
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            descriptor: &TemplateDescriptor,
            _context: &RenderContext,
        ) -> Result<RenderedFile, DomainError> {
            Ok(RenderedFile::new(
                descriptor.path.clone(),
                descriptor.path.as_str().as_bytes(),
            ))
        }
    }

    struct FailingRenderer;

    impl TemplateRenderer for FailingRenderer {
        fn render(
            &self,
            descriptor: &TemplateDescriptor,
            _context: &RenderContext,
        ) -> Result<RenderedFile, DomainError> {
            Err(DomainError::UnresolvedPlaceholder {
                path: descriptor.path.to_string(),
                placeholders: vec!["AUTHOR".into()],
            })
        }
    }

    fn config() -> ProjectConfig {
        ProjectConfig::new("demo", BackendFramework::FastApi, DatabaseKind::Sql, "demo_db").unwrap()
    }

    fn resolution() -> CatalogResolution {
        CatalogResolution {
            frontend: TemplateSet::new(Component::Frontend)
                .with(TemplateDescriptor::directory("frontend"))
                .with(TemplateDescriptor::static_file("frontend/index.html", "<html>")),
            backend: TemplateSet::new(Component::Backend)
                .with(TemplateDescriptor::directory("backend"))
                .with(TemplateDescriptor::rendered_file("backend/db.py", "{{DATABASE_URL}}")),
        }
    }

    #[derive(Default)]
    struct Recorded {
        dirs: Vec<PathBuf>,
        files: Vec<PathBuf>,
        appends: Vec<(PathBuf, String)>,
    }

    /// A mock filesystem where everything is absent except `occupied`, which
    /// holds a plain file. Every mutation is recorded.
    fn recording_fs(root: &Path, occupied: Option<&str>) -> (MockFilesystem, Arc<Mutex<Recorded>>) {
        let recorded: Arc<Mutex<Recorded>> = Arc::default();
        let occupied = occupied.map(|p| root.join(p));
        let mut fs = MockFilesystem::new();

        fs.expect_entry_kind().returning(move |path| {
            Ok(if occupied.as_deref() == Some(path) {
                ExistingEntry::File
            } else {
                ExistingEntry::Absent
            })
        });
        let sink = Arc::clone(&recorded);
        fs.expect_create_dir_all().returning(move |path| {
            sink.lock().unwrap().dirs.push(path.to_path_buf());
            Ok(())
        });
        let sink = Arc::clone(&recorded);
        fs.expect_write_new_file().returning(move |path, _| {
            sink.lock().unwrap().files.push(path.to_path_buf());
            Ok(())
        });
        let sink = Arc::clone(&recorded);
        fs.expect_append_file().returning(move |path, bytes| {
            sink.lock()
                .unwrap()
                .appends
                .push((path.to_path_buf(), String::from_utf8_lossy(bytes).into_owned()));
            Ok(())
        });

        (fs, recorded)
    }

    fn messages(logger: &AuditLogger, stream: LogStream) -> Vec<String> {
        logger
            .entries(stream)
            .iter()
            .map(|e| e.message.clone())
            .collect()
    }

    #[test]
    fn successful_build_creates_everything_in_order() {
        let root = Path::new("/work/demo");
        let (fs, recorded) = recording_fs(root, None);
        let mut logger = AuditLogger::new();

        let result = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap();

        assert!(result.root_created);
        let created: Vec<&str> = result.created_paths.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            created,
            [
                "frontend",
                "frontend/index.html",
                "backend",
                "backend/db.py",
                "log",
                "log/setup.log",
                "log/frontend.log",
                "log/backend.log",
            ]
        );

        let recorded = recorded.lock().unwrap();
        assert_eq!(recorded.dirs[0], root);
        assert_eq!(recorded.appends.len(), 3);

        let setup = messages(&logger, LogStream::Setup);
        assert!(setup[0].contains(&logger.run_id().to_string()));
        for milestone in [
            "Starting frontend setup",
            "Finished frontend setup",
            "Starting backend setup",
            "Finished backend setup",
            "Setup completed successfully",
        ] {
            assert!(setup.iter().any(|m| m.starts_with(milestone)), "missing {milestone}");
        }

        let backend = messages(&logger, LogStream::Backend);
        assert_eq!(
            backend.last().unwrap(),
            "Database setup file created for SQL with name 'demo_db'"
        );

        let file_entries = [LogStream::Frontend, LogStream::Backend]
            .into_iter()
            .flat_map(|s| messages(&logger, s))
            .filter(|m| m.starts_with("Created file"))
            .count();
        assert_eq!(file_entries, resolution().file_count());
        assert_eq!(logger.pending(), 0);
    }

    #[test]
    fn non_empty_root_aborts_without_writing() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind()
            .returning(|_| Ok(ExistingEntry::Directory));
        fs.expect_is_empty_dir().returning(|_| Ok(false));
        fs.expect_create_dir_all().never();
        fs.expect_write_new_file().never();
        fs.expect_append_file().never();

        let mut logger = AuditLogger::new();
        let err = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(Path::new("/work/demo"), &resolution(), &config())
            .unwrap_err();

        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::RootAlreadyExists { .. })
        ));
    }

    #[test]
    fn file_at_root_path_counts_as_existing_root() {
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|_| Ok(ExistingEntry::File));
        fs.expect_create_dir_all().never();
        fs.expect_append_file().never();

        let mut logger = AuditLogger::new();
        let err = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(Path::new("/work/demo"), &resolution(), &config())
            .unwrap_err();

        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::RootAlreadyExists { .. })
        ));
    }

    #[test]
    fn empty_root_is_reused() {
        let root = Path::new("/work/demo");
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|path| {
            Ok(if path == Path::new("/work/demo") {
                ExistingEntry::Directory
            } else {
                ExistingEntry::Absent
            })
        });
        fs.expect_is_empty_dir().returning(|_| Ok(true));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_new_file().returning(|_, _| Ok(()));
        fs.expect_append_file().returning(|_, _| Ok(()));

        let mut logger = AuditLogger::new();
        let result = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap();

        assert!(!result.root_created);
        assert!(
            messages(&logger, LogStream::Setup)
                .iter()
                .any(|m| m.starts_with("Using existing empty project root"))
        );
    }

    #[test]
    fn existing_file_stops_the_run_and_flushes_the_log() {
        let root = Path::new("/work/demo");
        let (fs, recorded) = recording_fs(root, Some("backend/db.py"));
        let mut logger = AuditLogger::new();

        let err = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap_err();

        let blocked = root.join("backend").join("db.py");
        assert_eq!(
            err.path(),
            Some(blocked.as_path()),
            "error should name the occupied path"
        );

        let recorded = recorded.lock().unwrap();
        assert!(!recorded.files.contains(&blocked));
        assert!(recorded.files.contains(&root.join("frontend").join("index.html")));
        assert!(recorded.dirs.contains(&root.join("log")));
        assert_eq!(recorded.appends.len(), 3);

        let backend = messages(&logger, LogStream::Backend);
        assert!(backend.last().unwrap().starts_with("Failed at backend/db.py"));
        let setup = messages(&logger, LogStream::Setup);
        assert!(setup.last().unwrap().starts_with("Setup aborted"));
        assert!(!setup.iter().any(|m| m.starts_with("Finished backend setup")));
    }

    #[test]
    fn pre_existing_log_file_is_not_appended_to() {
        let root = Path::new("/work/demo");
        let (fs, recorded) = recording_fs(root, Some("log/setup.log"));
        let mut logger = AuditLogger::new();

        let err = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap_err();

        let occupied = root.join("log").join("setup.log");
        assert_eq!(err.path(), Some(occupied.as_path()));

        let recorded = recorded.lock().unwrap();
        assert!(!recorded.files.contains(&occupied));
        let appended: Vec<&PathBuf> = recorded.appends.iter().map(|(p, _)| p).collect();
        assert_eq!(
            appended,
            [&root.join("log/frontend.log"), &root.join("log/backend.log")]
        );
        assert_eq!(logger.pending(), messages(&logger, LogStream::Setup).len());
    }

    #[test]
    fn render_defect_is_fatal_and_nothing_is_written_for_it() {
        let root = Path::new("/work/demo");
        let (fs, recorded) = recording_fs(root, None);
        let mut logger = AuditLogger::new();

        let err = TreeBuilder::new(&FailingRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap_err();

        assert!(matches!(
            err,
            StackseedError::Application(ApplicationError::TemplateRenderDefect { ref path, .. })
                if path == "frontend/index.html"
        ));
        let log_dir = root.join("log");
        assert!(
            recorded
                .lock()
                .unwrap()
                .files
                .iter()
                .all(|f| f.starts_with(&log_dir)),
            "only log files are written after a render defect"
        );
        assert!(messages(&logger, LogStream::Backend).is_empty());
    }

    #[test]
    fn filesystem_failure_carries_path_and_cause() {
        let root = Path::new("/work/demo");
        let mut fs = MockFilesystem::new();
        fs.expect_entry_kind().returning(|_| Ok(ExistingEntry::Absent));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_new_file().returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "permission denied".into(),
            }
            .into())
        });
        fs.expect_append_file().returning(|_, _| Ok(()));

        let mut logger = AuditLogger::new();
        let err = TreeBuilder::new(&EchoRenderer, &fs, &mut logger)
            .build(root, &resolution(), &config())
            .unwrap_err();

        assert!(err.to_string().contains("permission denied"));
        assert_eq!(
            err.path(),
            Some(root.join("frontend").join("index.html").as_path())
        );
    }
}
