//! User-interaction port for menu-driven prompts.

/// Presents questions to the user and collects answers.
///
/// All interaction in the tool is menu-driven; abstracting it lets
/// commands run against scripted answers in tests.
pub trait Prompter: Send + Sync {
    /// Asks for a line of free-form input, returning `default` when the
    /// user submits an empty line.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn input(
        &self,
        prompt: &str,
        default: Option<&str>,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Asks a yes/no question, returning `default` on an empty answer.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read.
    fn confirm(
        &self,
        prompt: &str,
        default: bool,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;

    /// Presents a numbered menu and returns the index of the chosen
    /// option.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or no valid choice is
    /// made.
    fn select(
        &self,
        prompt: &str,
        options: &[&str],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
