//! Argument-list command lines.

use std::fmt;

use serde::Serialize;

/// A program plus its arguments, never joined into a shell string for execution.
///
/// `Display` renders the command for operators to copy, quoting arguments
/// that contain whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// The default downstream application launch: `streamlit run st.py`.
    pub fn default_launch() -> Self {
        Self::new("streamlit", ["run", "st.py"])
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.chars().any(char::is_whitespace) {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
