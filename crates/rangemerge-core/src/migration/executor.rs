use crate::{error::InternalError, schema::Statement};

///
/// SchemaExecutor
///
/// Applies schema statements to some database. Implemented by the in-memory
/// engine and by `ScriptExecutor`, which only records SQL text.
///

pub trait SchemaExecutor {
    fn execute(&mut self, statement: &Statement) -> Result<(), InternalError>;

    /// Free-form note marking where one migration's statements begin.
    fn annotate(&mut self, _note: &str) {}
}

///
/// ScriptExecutor
///
/// Collects statements as a SQL script, one statement per line, with each
/// migration introduced by a `--` comment.
///

#[derive(Clone, Debug, Default)]
pub struct ScriptExecutor {
    lines: Vec<String>,
    statements: usize,
}

impl ScriptExecutor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            statements: 0,
        }
    }

    /// Number of statements recorded, excluding comments.
    #[must_use]
    pub const fn statement_count(&self) -> usize {
        self.statements
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The script text, newline terminated; empty when nothing ran.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.lines.iter().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

impl SchemaExecutor for ScriptExecutor {
    fn execute(&mut self, statement: &Statement) -> Result<(), InternalError> {
        self.lines.push(statement.to_sql());
        self.statements += 1;

        Ok(())
    }

    fn annotate(&mut self, note: &str) {
        self.lines.push(format!("-- {note}"));
    }
}
