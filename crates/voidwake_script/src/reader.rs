//! Script reader: source text to forms.
//!
//! The surface syntax is parenthesized prefix calls with keyword arguments:
//!
//! ```text
//! (BuildingType :name "BLD_SHIPYARD"
//!               :buildcost (* 10.0 Target.HabitableSize))
//! ```
//!
//! Symbols may contain dots (`Source.Planet.Population`); operator names
//! (`+ - * / % < <= > >= == != & | ~`) are ordinary symbols. `;` starts a
//! line comment.

use voidwake_model::{Error, Result};

/// One read syntax form.
#[derive(Clone, PartialEq, Debug)]
pub enum Form {
    /// Integer literal.
    Int(i64),
    /// Float literal.
    Float(f64),
    /// String literal.
    Str(String),
    /// Bare symbol, possibly dotted.
    Symbol(String),
    /// `:name`-style keyword marking a named argument.
    Keyword(String),
    /// Parenthesized call.
    List(Vec<Form>),
}

impl Form {
    /// Short form-kind name for error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Keyword(_) => "keyword",
            Self::List(_) => "list",
        }
    }
}

/// Reads every top-level form in `source`.
///
/// # Errors
/// Returns a parse error on malformed syntax.
pub fn read_forms(source: &str) -> Result<Vec<Form>> {
    let mut reader = Reader::new(source);
    let mut forms = Vec::new();
    reader.skip_whitespace();
    while !reader.at_end() {
        forms.push(reader.read_form()?);
        reader.skip_whitespace();
    }
    Ok(forms)
}

struct Reader<'src> {
    rest: &'src str,
    line: u32,
    column: u32,
}

impl<'src> Reader<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            line: 1,
            column: 1,
        }
    }

    fn at_end(&self) -> bool {
        self.rest.is_empty()
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        self.rest = &self.rest[ch.len_utf8()..];
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some(';') => {
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn error(&self, expected: &str) -> Error {
        Error::parse("reader", expected, self.line, self.column)
    }

    fn read_form(&mut self) -> Result<Form> {
        match self.peek() {
            None => Err(self.error("form")),
            Some('(') => self.read_list(),
            Some(')') => Err(self.error("form, found ')'")),
            Some('"') => self.read_string(),
            Some(':') => {
                self.advance();
                let word = self.read_word();
                if word.is_empty() {
                    return Err(self.error("keyword name after ':'"));
                }
                Ok(Form::Keyword(word))
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(false),
            Some('-') if self.second_is_digit() => {
                self.advance();
                self.read_number(true)
            }
            Some(_) => {
                let word = self.read_word();
                if word.is_empty() {
                    Err(self.error("form"))
                } else {
                    Ok(Form::Symbol(word))
                }
            }
        }
    }

    fn second_is_digit(&self) -> bool {
        self.rest
            .chars()
            .nth(1)
            .is_some_and(|ch| ch.is_ascii_digit())
    }

    fn read_list(&mut self) -> Result<Form> {
        self.advance();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(self.error("')'")),
                Some(')') => {
                    self.advance();
                    return Ok(Form::List(items));
                }
                Some(_) => items.push(self.read_form()?),
            }
        }
    }

    fn read_string(&mut self) -> Result<Form> {
        self.advance();
        let mut text = String::new();
        loop {
            match self.advance() {
                None => return Err(self.error("closing '\"'")),
                Some('"') => return Ok(Form::Str(text)),
                Some('\\') => match self.advance() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    _ => return Err(self.error("escape character")),
                },
                Some(ch) => text.push(ch),
            }
        }
    }

    fn read_number(&mut self, negative: bool) -> Result<Form> {
        let mut digits = String::new();
        let mut is_float = false;
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else if ch == '.' && !is_float && self.second_is_digit() {
                is_float = true;
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        if is_float {
            let value: f64 = digits
                .parse()
                .map_err(|_| self.error("float literal"))?;
            Ok(Form::Float(if negative { -value } else { value }))
        } else {
            let value: i64 = digits
                .parse()
                .map_err(|_| self.error("int literal"))?;
            Ok(Form::Int(if negative { -value } else { value }))
        }
    }

    /// Reads a symbol or keyword word: everything up to whitespace, a paren,
    /// a quote, or a comment.
    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || matches!(ch, '(' | ')' | '"' | ';') {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }
}
