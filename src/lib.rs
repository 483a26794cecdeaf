//! # polycons - Exact linear constraints over integer variables
//!
//! A small symbolic algebra for building the constraints that describe
//! convex polyhedra:
//! - Variables naming coordinate axes
//! - Linear expressions with arbitrary-precision integer coefficients
//! - Constraints (`==0`, `>=0`, `>0`) built from relational comparisons
//! - Constraint systems with insertion-ordered iteration
//! - A textual notation and a command line front end
//!
//! ## Architecture
//!
//! ```text
//! Text → Frontend (lexer, parser, evaluator) → Operands → Constraints → ConstraintSystem
//! ```
//!
//! ## Example
//!
//! ```rust
//! use polycons::prelude::*;
//!
//! let x = Variable::new(0);
//! let y = Variable::new(1);
//! let c = (5 * x - 2 * y).greater_than(x + y - 1);
//! assert_eq!(c.to_string(), "4*x0-3*x1+1>0");
//!
//! let mut cs = ConstraintSystem::new();
//! cs.insert(c);
//! cs.insert(x.greater_or_equal(0));
//! assert_eq!(cs.len(), 2);
//! assert_eq!(cs.space_dimension(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod frontend;
pub mod polyhedral;
pub mod utils;

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::frontend::{evaluate, parse, Outcome};
    pub use crate::polyhedral::{
        compare, equal, equation, greater_or_equal, greater_than, inequality, less_or_equal,
        less_than, strict_inequality, Comparison, Constraint, ConstraintKind, ConstraintSystem,
        LinearExpression, Operand, Relation, Relational, Scalar, ToScalar, Variable, VariablesSet,
    };
    pub use crate::utils::errors::*;
    pub use crate::utils::pretty::PrettyPrint;
    pub use crate::{process, EmitFormat, Session, SessionConfig};
}

use anyhow::{Context, Result};
use frontend::{Evaluator, Outcome};
use polyhedral::{Comparison, ConstraintSystem, Operand};
use utils::pretty::{PrettyPrint, DEFAULT_WIDTH};

/// Output format for a constraint system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitFormat {
    /// Single-line `{c0, c1}` form
    #[default]
    Text,
    /// Width-limited multi-line layout
    Pretty,
    /// JSON wire form
    Json,
}

/// Configuration for processing constraint text.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Names for variables 0, 1, ... in addition to `x<digits>`
    pub variable_names: Vec<String>,
    /// How to render the system
    pub emit: EmitFormat,
    /// Append a per-constraint classification report
    pub classify: bool,
    /// Line width for [`EmitFormat::Pretty`]
    pub width: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variable_names: Vec::new(),
            emit: EmitFormat::Text,
            classify: false,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Result of processing constraint text.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Every constraint, in statement order
    pub system: ConstraintSystem,
    /// Comparisons of two plain numbers, with their statement text
    pub truths: Vec<(String, bool)>,
    /// Statements without a relation, with their statement text
    pub values: Vec<(String, Operand)>,
}

impl Session {
    /// Render the system, plus the classification report when configured.
    pub fn render(&self, config: &SessionConfig) -> Result<String> {
        let mut output = match config.emit {
            EmitFormat::Text => self.system.to_string(),
            EmitFormat::Pretty => self.system.pretty_print(config.width),
            EmitFormat::Json => serde_json::to_string_pretty(&self.system)
                .context("Failed to serialize constraint system")?,
        };
        if config.classify {
            output.push('\n');
            output.push_str(&utils::classification_report(&self.system));
        }
        Ok(output)
    }
}

/// Parse and evaluate `source`, collecting every constraint into one
/// system.
pub fn process(source: &str, config: &SessionConfig) -> Result<Session> {
    let program = frontend::parse(source).context("Failed to parse input")?;
    let evaluator = Evaluator::with_names(config.variable_names.as_slice())?;

    let mut session = Session::default();
    for stmt in &program.statements {
        match evaluator.evaluate_statement(stmt)? {
            Outcome::Comparison(Comparison::Constraint(c)) => session.system.insert(c),
            Outcome::Comparison(Comparison::Truth(b)) => session.truths.push((stmt.to_string(), b)),
            Outcome::Value(v) => session.values.push((stmt.to_string(), v)),
        }
    }
    log::info!(
        "collected {} constraints in {} dimensions",
        session.system.len(),
        session.system.space_dimension()
    );
    Ok(session)
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
