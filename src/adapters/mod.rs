pub mod docker_command;
pub mod template;

pub use docker_command::DockerCommandAdapter;
pub use template::MinijinjaTemplateRenderer;
