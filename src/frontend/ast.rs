//! Abstract syntax tree node types and their canonical printed forms.

use std::fmt;

/// A parsed program: its statements in source order, plus any parser errors
/// accumulated while producing them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub errors: Vec<String>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let { name: String, value: Expr },
    Return { value: Expr },
    Expression(Expr),
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Let { name, value } => write!(f, "let {name} = {value};"),
            Stmt::Return { value } => write!(f, "return {value};"),
            Stmt::Expression(expr) => write!(f, "{expr}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
}

impl fmt::Display for BlockStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        write!(f, " }}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(String),
    IntLiteral(i64),
    BoolLiteral(bool),
    StringLiteral(String),
    Prefix {
        operator: String,
        right: Box<Expr>,
    },
    Infix {
        left: Box<Expr>,
        operator: String,
        right: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: BlockStmt,
        alternative: Option<BlockStmt>,
    },
    Function {
        params: Vec<String>,
        body: BlockStmt,
    },
    Call {
        function: Box<Expr>,
        args: Vec<Expr>,
    },
    Array(Vec<Expr>),
    Access {
        array: Box<Expr>,
        index: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Identifier(name) => write!(f, "{name}"),
            Expr::IntLiteral(n) => write!(f, "{n}"),
            Expr::BoolLiteral(b) => write!(f, "{b}"),
            Expr::StringLiteral(s) => write!(f, "{s}"),
            Expr::Prefix { operator, right } => write!(f, "({operator}{right})"),
            Expr::Infix {
                left,
                operator,
                right,
            } => write!(f, "({left} {operator} {right})"),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if{condition} {consequence}")?;
                if let Some(alt) = alternative {
                    write!(f, "else {alt}")?;
                }
                Ok(())
            }
            Expr::Function { params, body } => {
                write!(f, "fn({}) {body}", params.join(", "))
            }
            Expr::Call { function, args } => {
                let args: Vec<String> =
                    args.iter().map(std::string::ToString::to_string).collect();
                write!(f, "{function}({})", args.join(", "))
            }
            Expr::Array(elements) => {
                let elements: Vec<String> = elements
                    .iter()
                    .map(std::string::ToString::to_string)
                    .collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Expr::Access { array, index } => write!(f, "({array}[{index}])"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_let_and_return_statements() {
        let program = Program {
            statements: vec![
                Stmt::Let {
                    name: "x".to_string(),
                    value: Expr::IntLiteral(5),
                },
                Stmt::Return {
                    value: Expr::IntLiteral(5),
                },
            ],
            errors: vec![],
        };
        assert_eq!(program.to_string(), "let x = 5;return 5;");
    }

    #[test]
    fn prints_nested_infix_with_full_parenthesization() {
        let expr = Expr::Infix {
            left: Box::new(Expr::Infix {
                left: Box::new(Expr::Identifier("a".to_string())),
                operator: "+".to_string(),
                right: Box::new(Expr::Identifier("b".to_string())),
            }),
            operator: "*".to_string(),
            right: Box::new(Expr::Identifier("c".to_string())),
        };
        assert_eq!(expr.to_string(), "((a + b) * c)");
    }
}
