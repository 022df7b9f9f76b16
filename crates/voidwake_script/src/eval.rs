//! Form evaluator.
//!
//! Evaluation never touches game state; it folds forms into model nodes
//! using the operator layer and the builder tables. The evaluator borrows
//! the host for environment lookups, property reads, imports, and finished
//! definitions.

use voidwake_model::{BinaryOp, CompareOp, Error, ErrorKind, Result};

use crate::builders;
use crate::host::{DEPTH_LIMIT, ScriptHost};
use crate::modules;
use crate::ops;
use crate::reader::Form;
use crate::value::Value;

/// Call arguments split into positional forms and keyword/form pairs.
#[derive(Debug)]
pub struct CallArgs {
    positional: Vec<Form>,
    keywords: Vec<(String, Form)>,
}

impl CallArgs {
    /// Splits raw argument forms. Every keyword must be followed by a value
    /// form.
    ///
    /// # Errors
    /// Returns an error for a trailing keyword or a doubled keyword.
    pub fn parse(head: &str, forms: &[Form]) -> Result<Self> {
        let mut positional = Vec::new();
        let mut keywords: Vec<(String, Form)> = Vec::new();
        let mut iter = forms.iter();
        while let Some(form) = iter.next() {
            if let Form::Keyword(name) = form {
                let Some(value) = iter.next() else {
                    return Err(Error::type_mismatch(
                        format!("a value after :{name} in {head}"),
                        "end of call",
                    ));
                };
                if keywords.iter().any(|(existing, _)| existing == name) {
                    return Err(Error::type_mismatch(
                        format!("each keyword at most once in {head}"),
                        format!(":{name} repeated"),
                    ));
                }
                keywords.push((name.clone(), value.clone()));
            } else {
                positional.push(form.clone());
            }
        }
        Ok(Self {
            positional,
            keywords,
        })
    }

    /// The positional argument forms.
    #[must_use]
    pub fn positional(&self) -> &[Form] {
        &self.positional
    }

    /// Looks up a keyword argument's form.
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Form> {
        self.keywords
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, form)| form)
    }

    /// Requires a keyword argument.
    ///
    /// # Errors
    /// Returns an error naming the missing keyword.
    pub fn require(&self, head: &str, name: &str) -> Result<&Form> {
        self.keyword(name)
            .ok_or_else(|| Error::type_mismatch(format!(":{name} in {head}"), "missing argument"))
    }
}

/// Evaluates forms against a host.
pub struct Evaluator<'host> {
    host: &'host mut ScriptHost,
    file: String,
    depth: usize,
}

impl<'host> Evaluator<'host> {
    /// Creates an evaluator; `file` names the source in errors.
    pub fn new(host: &'host mut ScriptHost, file: impl Into<String>) -> Self {
        Self {
            host,
            file: file.into(),
            depth: 0,
        }
    }

    /// The host being evaluated against.
    pub fn host(&mut self) -> &mut ScriptHost {
        self.host
    }

    /// The file name used in errors.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Creates a script error at this file.
    pub(crate) fn error(&self, message: impl Into<String>) -> Error {
        Error::script(self.file.clone(), message)
    }

    /// Evaluates every top-level form for its definition side effects.
    ///
    /// # Errors
    /// Returns the first evaluation error.
    pub fn eval_program(&mut self, forms: &[Form]) -> Result<()> {
        for form in forms {
            self.eval(form)?;
        }
        Ok(())
    }

    /// Evaluates one form.
    ///
    /// # Errors
    /// Returns an evaluation error; exceeding the depth limit poisons the
    /// host.
    pub fn eval(&mut self, form: &Form) -> Result<Value> {
        self.depth += 1;
        if self.depth > DEPTH_LIMIT {
            self.depth -= 1;
            self.host.poison("evaluation depth limit exceeded");
            return Err(Error::new(ErrorKind::Internal(format!(
                "evaluation depth limit exceeded in {}",
                self.file
            ))));
        }
        let result = self.eval_inner(form);
        self.depth -= 1;
        result
    }

    fn eval_inner(&mut self, form: &Form) -> Result<Value> {
        match form {
            Form::Int(value) => Ok(Value::Int(voidwake_model::IntRef::Constant(*value))),
            Form::Float(value) => Ok(Value::Double(voidwake_model::DoubleRef::Constant(*value))),
            Form::Str(text) => Ok(Value::Str(voidwake_model::StringRef::Constant(
                text.clone(),
            ))),
            Form::Keyword(name) => Err(self.error(format!(":{name} outside call arguments"))),
            Form::Symbol(name) => self.eval_symbol(name),
            Form::List(items) => self.eval_list(items),
        }
    }

    fn eval_symbol(&mut self, name: &str) -> Result<Value> {
        if let Some((first, rest)) = name.split_once('.') {
            let mut value = self.lookup(first)?;
            for segment in rest.split('.') {
                let Value::Object(cursor) = value else {
                    return Err(Error::type_mismatch(
                        format!("object before .{segment} in {name}"),
                        value.kind(),
                    ));
                };
                value = self.host.properties().attribute(&cursor, segment)?;
            }
            return Ok(value);
        }
        self.lookup(name)
    }

    fn lookup(&self, name: &str) -> Result<Value> {
        self.host
            .lookup(name)
            .cloned()
            .ok_or_else(|| self.error(format!("unbound symbol: {name}")))
    }

    fn eval_list(&mut self, items: &[Form]) -> Result<Value> {
        let Some((head, args)) = items.split_first() else {
            return Err(self.error("empty call"));
        };
        let Form::Symbol(head) = head else {
            return Err(self.error(format!("call head must be a symbol, got {}", head.kind())));
        };

        // Special form: imports run against the module system, not the
        // environment.
        if head == "import" {
            let [Form::Symbol(dotted)] = args else {
                return Err(self.error("import takes one module name"));
            };
            let dotted = dotted.clone();
            modules::import(self.host, &dotted)?;
            return Ok(Value::Unit);
        }

        // Special form: list groups argument values without calling anything.
        if head == "list" {
            let values = args
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>>>()?;
            return Ok(Value::List(values));
        }

        if let Some(value) = self.eval_operator(head, args)? {
            return Ok(value);
        }

        match self.eval_symbol(head)? {
            Value::Builder(name) => {
                let call_args = CallArgs::parse(name, args)?;
                builders::call(self, name, &call_args)
            }
            other => Err(self.error(format!(
                "{head} is not callable (it is a {})",
                other.kind()
            ))),
        }
    }

    /// Operator calls. Returns `Ok(None)` when `head` is not an operator.
    fn eval_operator(&mut self, head: &str, args: &[Form]) -> Result<Option<Value>> {
        let binary_op = match head {
            "+" => Some(BinaryOp::Add),
            "-" if args.len() == 2 => Some(BinaryOp::Subtract),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "%" => Some(BinaryOp::Modulo),
            _ => None,
        };
        if let Some(op) = binary_op {
            let (lhs, rhs) = self.two_args(head, args)?;
            return ops::arithmetic(op, lhs, rhs).map(Some);
        }

        let compare_op = match head {
            "==" => Some(CompareOp::Eq),
            "!=" => Some(CompareOp::Ne),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Le),
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Ge),
            _ => None,
        };
        if let Some(op) = compare_op {
            let (lhs, rhs) = self.two_args(head, args)?;
            return ops::compare(op, lhs, rhs).map(Some);
        }

        match head {
            "-" => {
                let [operand] = args else {
                    return Err(self.error("- takes one or two arguments"));
                };
                let operand = self.eval(operand)?;
                ops::negate(operand).map(Some)
            }
            "&" => {
                let (lhs, rhs) = self.two_args(head, args)?;
                ops::and(lhs, rhs).map(Some)
            }
            "|" => {
                let (lhs, rhs) = self.two_args(head, args)?;
                ops::or(lhs, rhs).map(Some)
            }
            "~" => {
                let [operand] = args else {
                    return Err(self.error("~ takes one argument"));
                };
                let operand = self.eval(operand)?;
                ops::not(operand).map(Some)
            }
            _ => Ok(None),
        }
    }

    fn two_args(&mut self, head: &str, args: &[Form]) -> Result<(Value, Value)> {
        let [lhs, rhs] = args else {
            return Err(self.error(format!("{head} takes two arguments")));
        };
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        Ok((lhs, rhs))
    }
}

/// Reads and evaluates one source text.
///
/// # Errors
/// Returns the first reader or evaluation error.
pub fn eval_source(host: &mut ScriptHost, file: &str, source: &str) -> Result<()> {
    let forms = crate::reader::read_forms(source)?;
    Evaluator::new(host, file).eval_program(&forms)
}
