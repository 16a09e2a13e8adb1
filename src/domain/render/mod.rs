//! Artifact rendering: environment configuration to Dockerfile and startup chain.

mod phase;
mod template;

pub use phase::Phase;
pub use template::{TemplateContext, TemplateRenderer};

use serde::Serialize;

use crate::domain::AppError;
use crate::domain::catalog::startup::HEREDOC_DELIMITER;
use crate::domain::environment::EnvironmentConfig;
use phase::templates;

/// Driver script under `$HOME` that runs every startup service in order.
pub const STARTUP_DRIVER: &str = "startup.sh";
pub const NOVNC_VERSION: &str = "v1.5.0";
pub const WEBSOCKIFY_VERSION: &str = "v0.12.0";

/// Parser directive enabling heredocs. Must precede every comment.
pub const SYNTAX_DIRECTIVE: &str = "# syntax=docker/dockerfile:1";

/// Rendered build input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    /// Dockerfile text.
    pub build_spec: String,
    /// Contents of the startup driver materialized by the Dockerfile.
    pub startup_chain: String,
}

/// Renders an [`EnvironmentConfig`] phase by phase.
///
/// Pure: no I/O, no clock, no randomness.
pub struct ArtifactRenderer<R: TemplateRenderer> {
    templates: R,
}

impl<R: TemplateRenderer> ArtifactRenderer<R> {
    pub fn new(templates: R) -> Self {
        Self { templates }
    }

    pub fn render(&self, config: &EnvironmentConfig) -> Result<RenderedArtifact, AppError> {
        for service in config.startup_services() {
            service.validate()?;
        }

        let mut sections = Vec::with_capacity(Phase::ALL.len());
        for phase in Phase::ALL {
            if let Some(section) = self.render_phase(phase, config)? {
                sections.push(section);
            }
        }

        let mut build_spec = format!("{}\n{}", SYNTAX_DIRECTIVE, sections.join("\n\n"));
        build_spec.push('\n');

        Ok(RenderedArtifact { build_spec, startup_chain: startup_chain(config) })
    }

    /// Render one phase, or `None` when it has nothing to emit.
    pub fn render_phase(
        &self,
        phase: Phase,
        config: &EnvironmentConfig,
    ) -> Result<Option<String>, AppError> {
        let body = match phase {
            Phase::BaseImage => {
                let context = TemplateContext::new().with_var("base_image", config.base_image());
                self.fill(phase, context)?
            }
            Phase::SystemPackages | Phase::Housekeeping => {
                self.fill(phase, TemplateContext::new())?
            }
            Phase::Applications => self.each(
                phase,
                config
                    .apps()
                    .iter()
                    .map(|app| {
                        TemplateContext::new().with_var("install_command", &app.install_command)
                    }),
            )?,
            Phase::AdditionalPackages => {
                if config.additional_packages().is_empty() {
                    None
                } else {
                    let packages = config.additional_packages().join(" ");
                    self.fill(phase, TemplateContext::new().with_var("packages", packages))?
                }
            }
            Phase::DesktopBridge => self.fill(
                phase,
                TemplateContext::new()
                    .with_var("novnc_version", NOVNC_VERSION)
                    .with_var("websockify_version", WEBSOCKIFY_VERSION),
            )?,
            Phase::UserSetup => {
                self.fill(phase, TemplateContext::new().with_var("username", config.username()))?
            }
            Phase::StartupServices => Some(self.startup_services(config)?),
            Phase::Runtime => self.fill(
                phase,
                TemplateContext::new().with_var("python_version", config.python_version()),
            )?,
            Phase::CustomCommands => self.each(
                phase,
                config
                    .custom_commands()
                    .iter()
                    .map(|command| TemplateContext::new().with_var("command", command)),
            )?,
            Phase::RuntimeParameters => self.fill(
                phase,
                TemplateContext::new()
                    .with_var("display_num", config.display_num())
                    .with_var("display_height", config.display_height())
                    .with_var("display_width", config.display_width()),
            )?,
            Phase::Entrypoint => self.fill(
                phase,
                TemplateContext::new()
                    .with_var("username", config.username())
                    .with_var("driver", STARTUP_DRIVER),
            )?,
        };

        Ok(body.map(|text| format!("{}\n{}", phase.marker(), text)))
    }

    fn fill(&self, phase: Phase, context: TemplateContext) -> Result<Option<String>, AppError> {
        let (name, source) = phase.template();
        self.render_str(name, source, &context).map(Some)
    }

    fn each(
        &self,
        phase: Phase,
        contexts: impl Iterator<Item = TemplateContext>,
    ) -> Result<Option<String>, AppError> {
        let (name, source) = phase.template();
        let lines = contexts
            .map(|context| self.render_str(name, source, &context))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(if lines.is_empty() { None } else { Some(lines.join("\n")) })
    }

    fn startup_services(&self, config: &EnvironmentConfig) -> Result<String, AppError> {
        let driver = TemplateContext::new().with_var("driver", STARTUP_DRIVER);
        let (name, source) = Phase::StartupServices.template();

        let driver_block =
            self.render_str("dockerfile/startup_driver.j2", templates::STARTUP_DRIVER, &driver)?;
        let mut blocks = vec![driver_block];
        for service in config.startup_services() {
            let context = driver
                .clone()
                .with_var("filename", &service.filename)
                .with_var("script", service.script.trim_end())
                .with_var("delimiter", HEREDOC_DELIMITER);
            blocks.push(self.render_str(name, source, &context)?);
        }
        blocks.push(self.render_str(
            "dockerfile/startup_finalize.j2",
            templates::STARTUP_FINALIZE,
            &driver,
        )?);

        Ok(blocks.join("\n"))
    }

    fn render_str(
        &self,
        name: &str,
        source: &str,
        context: &TemplateContext,
    ) -> Result<String, AppError> {
        self.templates.render(source, context, name).map(|text| text.trim_end().to_string())
    }
}

/// Text of the driver script the Dockerfile assembles under `$HOME`.
pub fn startup_chain(config: &EnvironmentConfig) -> String {
    let home = format!("/home/{}", config.username());
    let mut chain = String::from("#!/bin/bash\nset -e\n");
    for service in config.startup_services() {
        chain.push_str(&format!("{}/{}\n", home, service.filename));
    }
    chain.push_str("tail -f /dev/null\n");
    chain
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::adapters::template::MinijinjaTemplateRenderer;
    use crate::domain::catalog::{
        DEFAULT_APPS, DEFAULT_STARTUP_SERVICES, DesktopApp, StartupService,
    };

    fn renderer() -> ArtifactRenderer<MinijinjaTemplateRenderer> {
        ArtifactRenderer::new(MinijinjaTemplateRenderer::new())
    }

    fn render(config: &EnvironmentConfig) -> RenderedArtifact {
        renderer().render(config).unwrap()
    }

    fn section<'a>(spec: &'a str, phase: Phase) -> &'a str {
        let start = spec.find(&phase.marker()).unwrap_or_else(|| panic!("{} missing", phase));
        let rest = &spec[start..];
        let end = rest[1..].find("# phase: ").map(|i| i + 1).unwrap_or(rest.len());
        &rest[..end]
    }

    fn assert_phase_order(spec: &str) {
        let positions: Vec<usize> =
            Phase::ALL.iter().filter_map(|phase| spec.find(&phase.marker())).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "phases out of order");
    }

    #[test]
    fn default_config_renders_three_apps_and_five_services() {
        let config = EnvironmentConfig::default();
        let spec = render(&config).build_spec;

        let apps = section(&spec, Phase::Applications);
        let installs: Vec<_> = apps.lines().filter(|l| l.starts_with("RUN ")).collect();
        let expected: Vec<_> =
            DEFAULT_APPS.iter().map(|a| format!("RUN {}", a.install_command)).collect();
        assert_eq!(installs, expected);

        let services = section(&spec, Phase::StartupServices);
        let writes: Vec<_> = services
            .lines()
            .filter_map(|l| l.strip_prefix("RUN cat > $HOME/"))
            .map(|l| l.trim_end_matches(" <<'EOF'"))
            .collect();
        let expected: Vec<_> = DEFAULT_STARTUP_SERVICES.iter().map(|s| s.filename).collect();
        assert_eq!(writes, expected);
    }

    #[test]
    fn caller_app_is_installed_last() {
        let config = EnvironmentConfig::builder()
            .app(DesktopApp::new("VSCode", "Code editor", "sudo apt-get install -y code"))
            .build()
            .unwrap();
        let spec = render(&config).build_spec;
        let apps = section(&spec, Phase::Applications);
        let installs: Vec<_> = apps.lines().filter(|l| l.starts_with("RUN ")).collect();
        assert_eq!(installs.len(), 4);
        assert_eq!(installs.last(), Some(&"RUN sudo apt-get install -y code"));
    }

    #[test]
    fn runtime_parameters_declare_geometry() {
        let config =
            EnvironmentConfig::builder().display(1280, 720).display_num(2).build().unwrap();
        let spec = render(&config).build_spec;
        let params = section(&spec, Phase::RuntimeParameters);
        let args: Vec<_> = params.lines().filter(|l| l.starts_with("ARG ")).collect();
        assert_eq!(args, vec!["ARG DISPLAY_NUM=2", "ARG HEIGHT=720", "ARG WIDTH=1280"]);
        assert!(!spec.contains("1024"));
        assert!(!spec.contains("768"));
    }

    #[test]
    fn additional_packages_omitted_when_empty() {
        let spec = render(&EnvironmentConfig::default()).build_spec;
        assert!(!spec.contains(&Phase::AdditionalPackages.marker()));
        assert!(!spec.contains(&Phase::CustomCommands.marker()));
    }

    #[test]
    fn additional_packages_joined_by_single_space() {
        let config = EnvironmentConfig::builder()
            .additional_packages(["htop", "vim", "jq"])
            .build()
            .unwrap();
        let spec = render(&config).build_spec;
        let section = section(&spec, Phase::AdditionalPackages);
        assert!(section.contains("RUN apt-get -y install htop vim jq\n"));
    }

    #[test]
    fn custom_commands_run_in_order() {
        let config = EnvironmentConfig::builder()
            .custom_commands(["pip install streamlit", "mkdir -p $HOME/work"])
            .build()
            .unwrap();
        let spec = render(&config).build_spec;
        let section = section(&spec, Phase::CustomCommands);
        let runs: Vec<_> = section.lines().filter(|l| l.starts_with("RUN ")).collect();
        assert_eq!(runs, vec!["RUN pip install streamlit", "RUN mkdir -p $HOME/work"]);
    }

    #[test]
    fn scalars_are_substituted_verbatim() {
        let config = EnvironmentConfig::builder()
            .username("dev")
            .python_version(crate::domain::environment::RuntimeVersion::new(3, 12, 4))
            .build()
            .unwrap();
        let spec = render(&config).build_spec;
        assert!(spec.contains("FROM ubuntu:22.04\n"));
        assert!(spec.contains("ENV USERNAME=dev\n"));
        assert!(spec.contains("ENV PYENV_VERSION=3.12.4\n"));
        assert!(spec.contains("ENTRYPOINT [\"/home/dev/startup.sh\"]"));
    }

    #[test]
    fn scripts_are_written_with_quoted_heredoc() {
        let spec = render(&EnvironmentConfig::default()).build_spec;
        assert!(spec.contains("RUN cat > $HOME/xvfb_startup.sh <<'EOF'\n#!/bin/bash\n"));
        assert!(spec.contains("RES_AND_DEPTH=${WIDTH}x${HEIGHT}x24"));
        assert!(spec.contains("echo \"$HOME/novnc_startup.sh\" >> $HOME/startup.sh"));
    }

    #[test]
    fn syntax_directive_precedes_every_comment() {
        let spec = render(&EnvironmentConfig::default()).build_spec;
        let mut lines = spec.lines();
        assert_eq!(lines.next(), Some(SYNTAX_DIRECTIVE));
        assert_eq!(lines.next(), Some(Phase::BaseImage.marker().as_str()));
        assert_eq!(lines.next(), Some("FROM ubuntu:22.04"));
    }

    #[test]
    fn entrypoint_is_last() {
        let spec = render(&EnvironmentConfig::default()).build_spec;
        let last = spec.trim_end().lines().last().unwrap();
        assert_eq!(last, "ENTRYPOINT [\"/home/user/startup.sh\"]");
        assert!(spec.ends_with('\n'));
    }

    #[test]
    fn startup_chain_lists_services_in_order() {
        let config = EnvironmentConfig::builder()
            .startup_service(StartupService::new("jupyter.sh", "#!/bin/bash\njupyter lab &\n"))
            .build()
            .unwrap();
        let chain = render(&config).startup_chain;
        let lines: Vec<_> = chain.lines().collect();
        assert_eq!(lines[0], "#!/bin/bash");
        assert_eq!(lines[2], "/home/user/xvfb_startup.sh");
        assert_eq!(lines[lines.len() - 2], "/home/user/jupyter.sh");
        assert_eq!(lines[lines.len() - 1], "tail -f /dev/null");
    }

    #[test]
    fn each_service_write_is_followed_by_its_driver_append() {
        let config = EnvironmentConfig::builder()
            .startup_service(StartupService::new("jupyter.sh", "#!/bin/bash\njupyter lab &\n"))
            .build()
            .unwrap();
        let artifact = render(&config);
        let services = section(&artifact.build_spec, Phase::StartupServices);

        let mut cursor = 0;
        for service in config.startup_services() {
            let write = format!("RUN cat > $HOME/{} <<'EOF'", service.filename);
            let append = format!("echo \"$HOME/{}\" >> $HOME/startup.sh", service.filename);

            let write_at = services[cursor..]
                .find(&write)
                .map(|i| cursor + i)
                .unwrap_or_else(|| panic!("{} not written in order", service.filename));
            let append_at = services[write_at..]
                .find(&append)
                .map(|i| write_at + i)
                .unwrap_or_else(|| panic!("{} never appended to driver", service.filename));
            assert!(
                !services[write_at + write.len()..append_at].contains("RUN cat > $HOME/"),
                "another service is written before {} is appended",
                service.filename
            );
            cursor = append_at + append.len();
        }

        let appended: Vec<String> = services
            .lines()
            .filter_map(|line| line.trim_start().strip_prefix("echo \"$HOME/"))
            .filter_map(|rest| rest.strip_suffix("\" >> $HOME/startup.sh"))
            .map(|filename| format!("/home/user/{}", filename))
            .collect();
        let chain: Vec<&str> = artifact
            .startup_chain
            .lines()
            .filter(|line| line.starts_with("/home/"))
            .collect();
        assert_eq!(appended, chain);
        assert_eq!(appended.len(), config.startup_services().len());
    }

    #[test]
    fn malformed_startup_service_fails_render() {
        let config = EnvironmentConfig::builder()
            .startup_service(StartupService::new("", "echo hi"))
            .build()
            .unwrap();
        let err = renderer().render(&config).unwrap_err();
        assert!(err.is_render_error());
    }

    fn config_strategy() -> impl Strategy<Value = EnvironmentConfig> {
        (
            prop::collection::vec(("[A-Z][a-z]{1,6}", "sudo apt-get install -y [a-z]{1,8}"), 0..4),
            prop::collection::vec("[a-z][a-z0-9-]{0,8}", 0..4),
            prop::collection::vec("echo [a-z]{1,8}", 0..4),
            prop::collection::vec(("[a-z]{1,6}\\.sh", "#!/bin/bash\necho [a-z]{1,8}"), 0..3),
            1u32..4000,
            1u32..4000,
            1u32..100,
        )
            .prop_map(|(apps, packages, commands, services, width, height, num)| {
                EnvironmentConfig::builder()
                    .apps(apps.into_iter().map(|(name, cmd)| DesktopApp::new(name, "", cmd)))
                    .additional_packages(packages)
                    .custom_commands(commands)
                    .startup_services(
                        services
                            .into_iter()
                            .map(|(file, script)| StartupService::new(file, script)),
                    )
                    .display(width, height)
                    .display_num(num)
                    .build()
                    .unwrap()
            })
    }

    proptest! {
        #[test]
        fn rendering_is_deterministic(config in config_strategy()) {
            let first = render(&config);
            let second = render(&config.clone());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn phase_order_holds(config in config_strategy()) {
            let spec = render(&config).build_spec;
            assert_phase_order(&spec);
            for phase in Phase::ALL.iter().filter(|p| !p.is_conditional()) {
                prop_assert!(spec.contains(&phase.marker()), "{} missing", phase);
            }
            prop_assert_eq!(
                spec.contains(&Phase::AdditionalPackages.marker()),
                !config.additional_packages().is_empty()
            );
            prop_assert_eq!(
                spec.contains(&Phase::CustomCommands.marker()),
                !config.custom_commands().is_empty()
            );
        }
    }
}
