//! Interactive vs CI environment detection

use std::io::IsTerminal;

/// Environment variables that mark a CI runner
const CI_VARS: [&str; 5] = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "JENKINS_URL"];

/// Decides between fancy and plain output, and whether prompts run
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        let ci = CI_VARS.iter().any(|v| std::env::var_os(v).is_some());
        Self {
            interactive: tty && !ci,
            auto_yes: false,
        }
    }

    /// A context with prompts and fancy output disabled
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Set auto-yes mode (bypass prompts with approval)
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    /// Whether prompts can be shown
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether prompts are auto-approved
    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Whether spinners, bars and cliclack framing are used
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}
