use std::sync::Arc;

use crate::adapters::{
    FFmpegAdapter, FFprobeAdapter, FsLocalAdapter, JsonlLogAdapter, ToolCheckAdapter, TracingLogAdapter,
};
use crate::app::{
    dependency_interactor::DependencyInteractor, generate_interactor::GenerateInteractor,
    inspect_interactor::InspectInteractor, replace_interactor::ReplaceInteractor,
    verify_interactor::VerifyInteractor,
};
use crate::config_initialization::AppSettings;
use crate::domain::errors::DomainError;
use crate::domain::rules::MetadataGenerator;
use crate::ports::{DependencyPort, ExecutePort, FsPort, LogPort, MetadataLogPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn generate_interactor(&self) -> Arc<GenerateInteractor>;
    fn replace_interactor(&self) -> Arc<ReplaceInteractor>;
    fn dependency_interactor(&self) -> Arc<DependencyInteractor>;
}

pub struct DefaultAppContainer {
    inspect_interactor: Arc<InspectInteractor>,
    generate_interactor: Arc<GenerateInteractor>,
    replace_interactor: Arc<ReplaceInteractor>,
    dependency_interactor: Arc<DependencyInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &AppSettings) -> Result<Self, DomainError> {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(settings.ffprobe_path.clone()));
        let execute_port: Arc<dyn ExecutePort> = Arc::new(FFmpegAdapter::new(settings.ffmpeg_path.clone()));
        let dependency_port: Arc<dyn DependencyPort> = Arc::new(ToolCheckAdapter::new());
        let fs_port: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());
        let log_port: Arc<dyn LogPort> = Arc::new(TracingLogAdapter::new("workflow"));
        let metadata_log: Option<Arc<dyn MetadataLogPort>> = if settings.log_enabled {
            Some(Arc::new(JsonlLogAdapter::new(settings.log_path.clone())) as Arc<dyn MetadataLogPort>)
        } else {
            None
        };

        let generator = MetadataGenerator::new(settings.policy.clone())?;

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let generate_interactor = Arc::new(GenerateInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            metadata_log,
            generator,
        ));

        let verify_interactor = Arc::new(VerifyInteractor::new(
            Arc::clone(&probe_port),
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
        ));

        let replace_interactor = Arc::new(ReplaceInteractor::new(
            Arc::clone(&generate_interactor),
            verify_interactor,
            execute_port,
            Arc::clone(&fs_port),
            Arc::clone(&log_port),
            settings.output.clone(),
        ));

        let dependency_interactor = Arc::new(DependencyInteractor::new(dependency_port, log_port));

        Ok(Self {
            inspect_interactor,
            generate_interactor,
            replace_interactor,
            dependency_interactor,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn generate_interactor(&self) -> Arc<GenerateInteractor> {
        Arc::clone(&self.generate_interactor)
    }

    fn replace_interactor(&self) -> Arc<ReplaceInteractor> {
        Arc::clone(&self.replace_interactor)
    }

    fn dependency_interactor(&self) -> Arc<DependencyInteractor> {
        Arc::clone(&self.dependency_interactor)
    }
}
