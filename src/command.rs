/// A single shell function exposed as a command, with the comment block that documents it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRecord {
    /// User facing name, underscores replaced by hyphens
    pub name: String,
    /// Shell function invoked by the generated dispatcher
    pub function_name: String,
    /// 1-based line of the definition
    pub line: usize,
    pub documentation: String,
}

impl CommandRecord {
    /// Build a record from the raw identifier found between `function cmd_` and `(`.
    #[must_use]
    pub fn new(identifier: &str, line: usize) -> Self {
        let identifier = identifier.trim();
        Self {
            name: identifier.replace('_', "-"),
            function_name: format!("cmd_{identifier}"),
            line,
            documentation: String::new(),
        }
    }

    /// Append one line of documentation, newline separated.
    pub fn push_doc_line(&mut self, text: &str) {
        if !self.documentation.is_empty() {
            self.documentation.push('\n');
        }
        self.documentation.push_str(text);
    }

    /// First line of the documentation, empty when there is none.
    #[must_use]
    pub fn summary(&self) -> &str {
        self.documentation.lines().next().unwrap_or_default()
    }
}
