use std::sync::Arc;

use crate::domain::ports::capture::*;
use crate::domain::ports::file_system::*;
use crate::domain::ports::notification::*;
use crate::domain::ports::process::*;

use super::capture::*;
use super::file_system::*;
use super::notification::*;
use super::process::*;

// ============================================================================
// ADAPTER FACTORY TRAIT
// ============================================================================

/// Factory trait for creating infrastructure adapters
pub trait AdapterFactory {
    type ProcessExecutor: ProcessExecutor + Send + Sync;
    type SystemToolChecker: SystemToolChecker + Send + Sync;
    type AnalysisEngine: AnalysisEngine + Send + Sync;
    type DirectoryOperations: DirectoryOperations + Send + Sync;
    type UserNotification: UserNotification + Send + Sync;

    fn create_process_executor(&self) -> Self::ProcessExecutor;
    fn create_system_tool_checker(&self) -> Self::SystemToolChecker;
    fn create_analysis_engine(&self) -> Self::AnalysisEngine;
    fn create_directory_operations(&self) -> Self::DirectoryOperations;
    fn create_user_notification(&self) -> Self::UserNotification;
}

// ============================================================================
// STANDARD ADAPTER FACTORY
// ============================================================================

/// Standard factory implementation using all concrete adapters
pub struct StandardAdapterFactory {
    config: FactoryConfig,
}

/// Configuration for the adapter factory
#[derive(Debug, Clone)]
pub struct FactoryConfig {
    pub engine_binary: String,
    pub engine_extra_args: Vec<String>,
    pub use_colors: bool,
    pub emoji_enabled: bool,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            engine_binary: crate::DEFAULT_ENGINE.to_string(),
            engine_extra_args: Vec::new(),
            use_colors: true,
            emoji_enabled: true,
        }
    }
}

impl AdapterFactory for StandardAdapterFactory {
    type ProcessExecutor = TokioProcessExecutor;
    type SystemToolChecker = StandardToolChecker;
    type AnalysisEngine = ZeekEngine;
    type DirectoryOperations = TokioDirectoryManager;
    type UserNotification = ConsoleUserNotification;

    fn create_process_executor(&self) -> Self::ProcessExecutor {
        TokioProcessExecutor::new()
    }

    fn create_system_tool_checker(&self) -> Self::SystemToolChecker {
        StandardToolChecker::new()
    }

    fn create_analysis_engine(&self) -> Self::AnalysisEngine {
        ZeekEngine::with_custom_path(
            self.config.engine_binary.clone(),
            Arc::new(self.create_process_executor()),
        )
        .with_extra_args(self.config.engine_extra_args.clone())
    }

    fn create_directory_operations(&self) -> Self::DirectoryOperations {
        TokioDirectoryManager::new()
    }

    fn create_user_notification(&self) -> Self::UserNotification {
        ConsoleUserNotification::new()
            .with_colors(self.config.use_colors)
            .with_emoji(self.config.emoji_enabled)
    }
}

impl StandardAdapterFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }
}

// ============================================================================
// DEPENDENCY CONTAINER
// ============================================================================

/// Container holding all infrastructure dependencies
pub struct DependencyContainer {
    factory: StandardAdapterFactory,

    // Cached instances (using Arc for shared ownership)
    analysis_engine: Option<Arc<dyn AnalysisEngine + Send + Sync>>,
    directory_operations: Option<Arc<dyn DirectoryOperations + Send + Sync>>,
    user_notification: Option<Arc<dyn UserNotification + Send + Sync>>,
}

impl DependencyContainer {
    pub fn new(factory: StandardAdapterFactory) -> Self {
        Self {
            factory,
            analysis_engine: None,
            directory_operations: None,
            user_notification: None,
        }
    }

    // Lazy initialization with caching
    pub fn analysis_engine(&mut self) -> Arc<dyn AnalysisEngine + Send + Sync> {
        if let Some(cached) = &self.analysis_engine {
            return cached.clone();
        }
        let created: Arc<dyn AnalysisEngine + Send + Sync> = Arc::new(self.factory.create_analysis_engine());
        self.analysis_engine = Some(created.clone());
        created
    }

    pub fn directory_operations(&mut self) -> Arc<dyn DirectoryOperations + Send + Sync> {
        if let Some(cached) = &self.directory_operations {
            return cached.clone();
        }
        let created: Arc<dyn DirectoryOperations + Send + Sync> = Arc::new(self.factory.create_directory_operations());
        self.directory_operations = Some(created.clone());
        created
    }

    pub fn user_notification(&mut self) -> Arc<dyn UserNotification + Send + Sync> {
        if let Some(cached) = &self.user_notification {
            return cached.clone();
        }
        let created: Arc<dyn UserNotification + Send + Sync> = Arc::new(self.factory.create_user_notification());
        self.user_notification = Some(created.clone());
        created
    }

    // Create new instances (not cached)
    pub fn create_system_tool_checker(&self) -> impl SystemToolChecker + Send + Sync {
        self.factory.create_system_tool_checker()
    }

    pub fn engine_binary(&self) -> &str {
        &self.factory.config().engine_binary
    }
}

// ============================================================================
// BUILDER PATTERN FOR FACTORY CONFIG
// ============================================================================

impl FactoryConfig {
    pub fn builder() -> FactoryConfigBuilder {
        FactoryConfigBuilder::new()
    }
}

pub struct FactoryConfigBuilder {
    config: FactoryConfig,
}

impl FactoryConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: FactoryConfig::default(),
        }
    }

    pub fn engine_binary(mut self, binary: impl Into<String>) -> Self {
        self.config.engine_binary = binary.into();
        self
    }

    pub fn engine_extra_args(mut self, args: Vec<String>) -> Self {
        self.config.engine_extra_args = args;
        self
    }

    pub fn colors(mut self, use_colors: bool) -> Self {
        self.config.use_colors = use_colors;
        self
    }

    pub fn emoji(mut self, emoji_enabled: bool) -> Self {
        self.config.emoji_enabled = emoji_enabled;
        self
    }

    pub fn build(self) -> FactoryConfig {
        self.config
    }
}

impl Default for FactoryConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CONVENIENCE FUNCTIONS
// ============================================================================

/// Create a dependency container with custom configuration
pub fn create_container_with_config(config: FactoryConfig) -> DependencyContainer {
    let factory = StandardAdapterFactory::new(config);
    DependencyContainer::new(factory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_caches_instances() {
        let config = FactoryConfig::builder()
            .engine_binary("/opt/zeek/bin/zeek")
            .colors(false)
            .emoji(false)
            .build();
        let mut container = create_container_with_config(config);

        let first = container.analysis_engine();
        let second = container.analysis_engine();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "/opt/zeek/bin/zeek");
        assert_eq!(container.engine_binary(), "/opt/zeek/bin/zeek");

        let dirs_a = container.directory_operations();
        let dirs_b = container.directory_operations();
        assert!(Arc::ptr_eq(&dirs_a, &dirs_b));
    }

    #[test]
    fn test_default_engine() {
        let mut container = create_container_with_config(FactoryConfig::default());
        assert_eq!(container.analysis_engine().name(), "zeek");
    }
}
