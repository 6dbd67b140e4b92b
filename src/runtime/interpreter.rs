//! Tree-walking evaluator.

use std::rc::Rc;

use crate::frontend::ast::{BlockStmt, Expr, Program, Stmt};

use super::builtins;
use super::environment::Environment;
use super::value::{FunctionValue, Value};

/// The three-variant result every `eval` call produces: an ordinary value,
/// a return in flight, or a fatal evaluation error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Value(Value),
    Return(Value),
    Error(String),
}

impl Outcome {
    fn into_result(self) -> Result<Value, String> {
        match self {
            Outcome::Value(v) | Outcome::Return(v) => Ok(v),
            Outcome::Error(message) => Err(message),
        }
    }
}

/// Tree-walking interpreter. Holds no state of its own beyond what's needed
/// to evaluate one `Program`; the persisted state across calls lives in the
/// `Environment` the caller threads back in (see `Repl`).
#[derive(Default)]
pub struct Interpreter;

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a whole program against `env`. A top-level `return` simply
    /// becomes the program's value; it has nothing left to propagate out of.
    #[must_use]
    pub fn eval_program(&self, program: &Program, env: &Environment) -> Outcome {
        let mut result = Outcome::Value(Value::Null);
        for stmt in &program.statements {
            result = self.eval_stmt(stmt, env);
            match result {
                Outcome::Error(_) => return result,
                Outcome::Return(value) => return Outcome::Value(value),
                Outcome::Value(_) => {}
            }
        }
        result
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Environment) -> Outcome {
        match stmt {
            Stmt::Let { name, value } => match self.eval_expr(value, env) {
                Outcome::Error(message) => Outcome::Error(message),
                Outcome::Return(_) => {
                    unreachable!("expressions never produce Return directly")
                }
                Outcome::Value(value) => {
                    env.set(name.clone(), value);
                    Outcome::Value(Value::Null)
                }
            },
            Stmt::Return { value } => match self.eval_expr(value, env) {
                Outcome::Value(value) => Outcome::Return(value),
                other => other,
            },
            Stmt::Expression(expr) => self.eval_expr(expr, env),
        }
    }

    /// Evaluates statements in order; an `Error` or a `Return` short-circuits
    /// and propagates outward unchanged, which is how `return` inside a
    /// nested `if` escapes the enclosing function body.
    fn eval_block(&self, block: &BlockStmt, env: &Environment) -> Outcome {
        let mut result = Outcome::Value(Value::Null);
        for stmt in &block.statements {
            result = self.eval_stmt(stmt, env);
            if matches!(result, Outcome::Error(_) | Outcome::Return(_)) {
                return result;
            }
        }
        result
    }

    fn eval_expr(&self, expr: &Expr, env: &Environment) -> Outcome {
        match expr {
            Expr::IntLiteral(n) => Outcome::Value(Value::Integer(*n)),
            Expr::BoolLiteral(b) => Outcome::Value(Value::Boolean(*b)),
            Expr::StringLiteral(s) => Outcome::Value(Value::string(s.as_str())),
            Expr::Identifier(name) => self.eval_identifier(name, env),
            Expr::Prefix { operator, right } => self.eval_prefix(operator, right, env),
            Expr::Infix {
                left,
                operator,
                right,
            } => self.eval_infix(left, operator, right, env),
            Expr::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if(condition, consequence, alternative.as_ref(), env),
            Expr::Function { params, body } => Outcome::Value(Value::Function(Rc::new(
                FunctionValue {
                    params: params.clone(),
                    body: body.clone(),
                    env: env.clone(),
                },
            ))),
            Expr::Call { function, args } => self.eval_call(function, args, env),
            Expr::Array(elements) => self.eval_array(elements, env),
            Expr::Access { array, index } => self.eval_access(array, index, env),
        }
    }

    fn eval_identifier(&self, name: &str, env: &Environment) -> Outcome {
        if let Some(value) = env.get(name) {
            return Outcome::Value(value);
        }
        if builtins::is_builtin(name) {
            return Outcome::Value(Value::Builtin(
                builtins::NAMES
                    .iter()
                    .copied()
                    .find(|n| *n == name)
                    .expect("is_builtin just confirmed membership"),
            ));
        }
        Outcome::Error(format!("identifier not found: {name}"))
    }

    fn eval_prefix(&self, operator: &str, right: &Expr, env: &Environment) -> Outcome {
        let right = match self.eval_expr(right, env) {
            Outcome::Value(v) => v,
            other => return other,
        };
        match (operator, &right) {
            ("!", _) => Outcome::Value(Value::Boolean(!right.is_truthy())),
            ("-", Value::Integer(n)) => Outcome::Value(Value::Integer(-n)),
            (op, _) => Outcome::Error(format!("unknown operator: {op} for {}", describe(&right))),
        }
    }

    fn eval_infix(&self, left: &Expr, operator: &str, right: &Expr, env: &Environment) -> Outcome {
        let left = match self.eval_expr(left, env) {
            Outcome::Value(v) => v,
            other => return other,
        };
        let right = match self.eval_expr(right, env) {
            Outcome::Value(v) => v,
            other => return other,
        };

        match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => Self::eval_integer_infix(*a, operator, *b),
            (Value::String(a), Value::String(b)) if operator == "+" => {
                Outcome::Value(Value::string(format!("{a}{b}")))
            }
            _ if operator == "==" => Outcome::Value(Value::Boolean(left == right)),
            _ if operator == "!=" => Outcome::Value(Value::Boolean(left != right)),
            _ => Outcome::Error(format!(
                "unknown operator: {operator} for left: {} and right: {}",
                describe(&left),
                describe(&right)
            )),
        }
    }

    fn eval_integer_infix(a: i64, operator: &str, b: i64) -> Outcome {
        match operator {
            "+" => Outcome::Value(Value::Integer(a + b)),
            "-" => Outcome::Value(Value::Integer(a - b)),
            "*" => Outcome::Value(Value::Integer(a * b)),
            "/" => {
                if b == 0 {
                    Outcome::Error("division by zero".to_string())
                } else {
                    Outcome::Value(Value::Integer(a / b))
                }
            }
            "<" => Outcome::Value(Value::Boolean(a < b)),
            ">" => Outcome::Value(Value::Boolean(a > b)),
            "==" => Outcome::Value(Value::Boolean(a == b)),
            "!=" => Outcome::Value(Value::Boolean(a != b)),
            op => Outcome::Error(format!(
                "unknown operator: {op} for left: {a} and right: {b}"
            )),
        }
    }

    fn eval_if(
        &self,
        condition: &Expr,
        consequence: &BlockStmt,
        alternative: Option<&BlockStmt>,
        env: &Environment,
    ) -> Outcome {
        let condition = match self.eval_expr(condition, env) {
            Outcome::Value(v) => v,
            other => return other,
        };
        if condition.is_truthy() {
            self.eval_block(consequence, env)
        } else if let Some(alternative) = alternative {
            self.eval_block(alternative, env)
        } else {
            Outcome::Value(Value::Null)
        }
    }

    fn eval_array(&self, elements: &[Expr], env: &Environment) -> Outcome {
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            match self.eval_expr(element, env) {
                Outcome::Value(v) => values.push(v),
                other => return other,
            }
        }
        Outcome::Value(Value::array(values))
    }

    fn eval_access(&self, array: &Expr, index: &Expr, env: &Environment) -> Outcome {
        let array_value = match self.eval_expr(array, env) {
            Outcome::Value(v) => v,
            other => return other,
        };
        let index_value = match self.eval_expr(index, env) {
            Outcome::Value(v) => v,
            other => return other,
        };
        let Value::Array(elements) = &array_value else {
            return Outcome::Error(format!(
                "unknow access operation for {}",
                describe(&array_value)
            ));
        };
        let Value::Integer(i) = index_value else {
            return Outcome::Error(format!(
                "cannot access array using {}",
                describe(&index_value)
            ));
        };
        if i < 0 || i as usize >= elements.len() {
            return Outcome::Value(Value::Null);
        }
        Outcome::Value(elements[i as usize].clone())
    }

    fn eval_call(&self, function: &Expr, args: &[Expr], env: &Environment) -> Outcome {
        let callee = match self.eval_expr(function, env) {
            Outcome::Value(v) => v,
            other => return other,
        };

        let mut evaluated_args = Vec::with_capacity(args.len());
        for arg in args {
            match self.eval_expr(arg, env) {
                Outcome::Value(v) => evaluated_args.push(v),
                Outcome::Error(message) => {
                    return Outcome::Error(format!("error evaluating function args: {message}"))
                }
                Outcome::Return(_) => unreachable!("expressions never produce Return directly"),
            }
        }

        match callee {
            Value::Function(func) => self.apply_function(&func, &evaluated_args),
            Value::Builtin(name) => match builtins::call(name, &evaluated_args) {
                Ok(value) => Outcome::Value(value),
                Err(message) => Outcome::Error(message),
            },
            other => Outcome::Error(format!("{} is not a function", describe(&other))),
        }
    }

    fn apply_function(&self, func: &FunctionValue, args: &[Value]) -> Outcome {
        let call_env = Environment::new_enclosed(&func.env);
        for (param, arg) in func.params.iter().zip(args) {
            call_env.set(param.clone(), arg.clone());
        }
        match self.eval_block(&func.body, &call_env) {
            Outcome::Return(value) => Outcome::Value(value),
            other => other,
        }
    }
}

/// Evaluates `program` against a fresh root environment, for callers that
/// only need a one-shot run (the `monkey run` CLI subcommand).
pub fn eval(program: &Program) -> Result<Value, String> {
    let interpreter = Interpreter::new();
    let env = Environment::new();
    interpreter.eval_program(program, &env).into_result()
}

/// How a value reads inside an error message: strings are quoted, everything
/// else uses its ordinary printable form.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    }
}
