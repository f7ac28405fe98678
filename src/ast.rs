use std::fmt;

use crate::error::ParseError;

/// A location in the source text.
///
/// Lines and columns are both 1-based. Columns count characters, not bytes,
/// so identifiers written in non-ASCII scripts report the column a reader
/// would expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    /// Source line, starting at 1.
    pub line:   usize,
    /// Source column, starting at 1.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and a column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} col {}", self.line, self.column)
    }
}

/// An expression node of a formula.
///
/// Expressions are built once by the parser and never mutated afterwards.
/// Every variant carries the position of the token that introduced it, which
/// is what runtime errors report.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a variable or function by name, e.g. `CLOSE`.
    Identifier {
        /// Name as written in the source.
        name:     String,
        /// Location of the identifier.
        position: Position,
    },
    /// A numeric literal such as `20` or `0.618`.
    NumberLiteral {
        /// Parsed value.
        value:    f64,
        /// The literal exactly as written, used when printing the tree.
        literal:  String,
        /// Location of the literal.
        position: Position,
    },
    /// A single-quoted string literal.
    StringLiteral {
        /// Contents without the surrounding quotes.
        value:    String,
        /// Location of the opening quote.
        position: Position,
    },
    /// A binary operation (arithmetic, comparison or logical).
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Location of the operator token.
        position: Position,
    },
    /// A prefix operation: `NOT x` or `-x`.
    Unary {
        /// The operator.
        op:       UnaryOperator,
        /// The operand.
        expr:     Box<Self>,
        /// Location of the operator token.
        position: Position,
    },
    /// A call such as `MA(CLOSE, 5)`.
    FunctionCall {
        /// The callee expression, normally an identifier.
        function:  Box<Self>,
        /// Argument expressions in source order.
        arguments: Vec<Self>,
        /// Location of the opening parenthesis.
        position:  Position,
    },
}

impl Expr {
    /// Returns the location recorded for this node.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Identifier { position, .. }
            | Self::NumberLiteral { position, .. }
            | Self::StringLiteral { position, .. }
            | Self::Binary { position, .. }
            | Self::Unary { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }
}

/// A single statement of a formula.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `name : expr [,MOD...]` or `name := expr [,MOD...]`.
    Assignment {
        /// The variable being bound.
        name:          String,
        /// The value expression.
        value:         Expr,
        /// `true` for the single-colon form, which marks a plotted output.
        is_output:     bool,
        /// Trailing modifiers in declared order, e.g. `COLORRED`.
        suffix_params: Vec<String>,
        /// Location of the variable name.
        position:      Position,
    },
    /// A bare expression evaluated for its value.
    Expression {
        /// The expression.
        expr:     Expr,
        /// Location of the first token.
        position: Position,
    },
}

impl Statement {
    /// Returns the location recorded for this statement.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Assignment { position, .. } | Self::Expression { position, .. } => *position,
        }
    }
}

/// The parsed form of a whole formula source.
///
/// A `Program` is never rejected by the parser; instead the errors it met
/// are collected in `errors` next to every statement parsed before parsing
/// stopped. Hosts inspect `errors` before deciding to evaluate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements in source order.
    pub statements: Vec<Statement>,
    /// Syntax errors; parsing stops at the first one.
    pub errors:     Vec<ParseError>,
}

impl Program {
    /// Returns `true` when the parser reported no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Renders the program as an indented node tree, one node per line.
    ///
    /// Unlike the [`Display`](fmt::Display) form, which prints source text
    /// back, the tree shows how the parser grouped operands, with positions.
    /// Syntax errors are listed after the statements.
    ///
    /// # Example
    /// ```
    /// use formulang::compile;
    ///
    /// let tree = compile("x : -1 + 2;").tree().to_string();
    /// assert_eq!(tree,
    ///            "Program (1 statement)\n\
    ///             \x20 Assignment x (output) @ line 1 col 1\n\
    ///             \x20   Binary + @ line 1 col 8\n\
    ///             \x20     Unary - @ line 1 col 5\n\
    ///             \x20       Number 1 @ line 1 col 6\n\
    ///             \x20     Number 2 @ line 1 col 10\n");
    /// ```
    #[must_use]
    pub const fn tree(&self) -> Tree<'_> {
        Tree(self)
    }
}

/// Indented tree view of a [`Program`], built by [`Program::tree`].
#[derive(Debug, Clone, Copy)]
pub struct Tree<'a>(&'a Program);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.0;
        let count = program.statements.len();
        let noun = if count == 1 { "statement" } else { "statements" };
        writeln!(f, "Program ({count} {noun})")?;

        for statement in &program.statements {
            write_statement(f, statement)?;
        }
        for error in &program.errors {
            writeln!(f, "  Error: {error}")?;
        }
        Ok(())
    }
}

fn write_statement(f: &mut fmt::Formatter<'_>, statement: &Statement) -> fmt::Result {
    match statement {
        Statement::Assignment { name,
                                value,
                                is_output,
                                suffix_params,
                                position, } => {
            let kind = if *is_output { "output" } else { "local" };
            writeln!(f, "  Assignment {name} ({kind}) @ {position}")?;
            if !suffix_params.is_empty() {
                writeln!(f, "    Suffix {}", suffix_params.join(","))?;
            }
            write_expr(f, value, 2)
        },
        Statement::Expression { expr, position } => {
            writeln!(f, "  Expression @ {position}")?;
            write_expr(f, expr, 2)
        },
    }
}

// Tree height is bounded by the parser's nesting limit.
fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match expr {
        Expr::Identifier { name, position } => {
            writeln!(f, "{indent}Identifier {name} @ {position}")
        },
        Expr::NumberLiteral { literal,
                              position,
                              .. } => writeln!(f, "{indent}Number {literal} @ {position}"),
        Expr::StringLiteral { value, position } => {
            writeln!(f, "{indent}String '{value}' @ {position}")
        },
        Expr::Binary { left,
                       op,
                       right,
                       position, } => {
            writeln!(f, "{indent}Binary {op} @ {position}")?;
            write_expr(f, left, depth + 1)?;
            write_expr(f, right, depth + 1)
        },
        Expr::Unary { op, expr, position } => {
            writeln!(f, "{indent}Unary {} @ {position}", op.to_string().trim_end())?;
            write_expr(f, expr, depth + 1)
        },
        Expr::FunctionCall { function,
                             arguments,
                             position, } => {
            writeln!(f, "{indent}Call ({} arguments) @ {position}", arguments.len())?;
            write_expr(f, function, depth + 1)?;
            arguments.iter().try_for_each(|arg| write_expr(f, arg, depth + 1))
        },
    }
}

/// Binary operators, from lowest to highest binding class:
/// logical, comparison, additive and multiplicative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `AND`
    And,
    /// `OR`
    Or,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `>=`
    GreaterEqual,
    /// `<=`
    LessEqual,
    /// `=` or `==`
    Equal,
    /// `!=` or `<>`
    NotEqual,
}

impl BinaryOperator {
    /// `true` for `AND` and `OR`.
    #[must_use]
    pub const fn is_logical(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }

    /// `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Greater
                 | Self::Less
                 | Self::GreaterEqual
                 | Self::LessEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `NOT`
    Not,
    /// `-`
    Negate,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Greater => ">",
            Self::Less => "<",
            Self::GreaterEqual => ">=",
            Self::LessEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        f.write_str(symbol)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not => f.write_str("NOT "),
            Self::Negate => f.write_str("-"),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name, .. } => f.write_str(name),
            Self::NumberLiteral { literal, .. } => f.write_str(literal),
            Self::StringLiteral { value, .. } => write!(f, "'{value}'"),
            Self::Binary { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Unary { op, expr, .. } => write!(f, "({op}{expr})"),
            Self::FunctionCall { function,
                                 arguments,
                                 .. } => {
                write!(f, "{function}(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            },
        }
    }
}

/// Prints statements back in source form.
///
/// # Example
/// ```
/// use formulang::compile;
///
/// let program = compile("ma5 : MA(CLOSE, 5),COLORRED,LINETHICK2;");
/// assert_eq!(program.statements[0].to_string(),
///            "ma5 : MA(CLOSE, 5),COLORRED,LINETHICK2;");
/// ```
impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assignment { name,
                               value,
                               is_output,
                               suffix_params,
                               .. } => {
                let sep = if *is_output { ":" } else { ":=" };
                write!(f, "{name} {sep} {value}")?;
                for param in suffix_params {
                    write!(f, ",{param}")?;
                }
                f.write_str(";")
            },
            Self::Expression { expr, .. } => write!(f, "{expr}"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{statement}")?;
        }
        Ok(())
    }
}
