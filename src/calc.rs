use std::collections::HashMap;

use crate::error::CalcError;
use crate::stack::Stack;

/// Depth limit for nested user-word invocation. A word whose body names
/// itself (directly or indirectly) would otherwise recurse forever.
const MAX_WORD_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
enum ArithOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithOp {
    /// Pops operand2 (top) then operand1 and pushes `f(operand1, operand2)`.
    fn eval(&self, stack: &mut Stack) -> Result<(), CalcError> {
        let (operand2, operand1) = stack.pop2()?;
        let result = match self {
            Self::Add => operand1.wrapping_add(operand2),
            Self::Subtract => operand1.wrapping_sub(operand2),
            Self::Multiply => operand1.wrapping_mul(operand2),
            Self::Divide => {
                if operand2 == 0 {
                    return Err(CalcError::DivisionByZero);
                }
                floor_div(operand1, operand2)
            }
        };
        stack.push(result);
        Ok(())
    }
}

// Rust's `/` truncates toward zero; the calculator floors. Wrapping ops so
// that i64::MIN / -1 wraps like the other arithmetic words instead of
// panicking. Its remainder is 0, so the floor adjustment never underflows.
fn floor_div(dividend: i64, divisor: i64) -> i64 {
    let quotient = dividend.wrapping_div(divisor);
    if dividend.wrapping_rem(divisor) != 0 && (dividend < 0) != (divisor < 0) {
        quotient - 1
    } else {
        quotient
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StackOp {
    Drop,
    Swap,
    Dup,
    Over,
}

impl StackOp {
    fn eval(&self, stack: &mut Stack) -> Result<(), CalcError> {
        match self {
            Self::Drop => {
                stack.pop()?;
            }
            Self::Swap => {
                let (top, next) = stack.pop2()?;
                stack.push(top);
                stack.push(next);
            }
            Self::Dup => {
                let top = stack.peek().ok_or(CalcError::StackUnderflow)?;
                stack.push(top);
            }
            Self::Over => {
                let (top, next) = stack.pop2()?;
                stack.push(next);
                stack.push(top);
                stack.push(next);
            }
        }
        Ok(())
    }
}

/// One word-table entry. User definitions store their body as raw text and
/// re-enter the evaluator on invocation; there is no compiled form.
#[derive(Clone, Debug, PartialEq)]
enum Word {
    Arithmetic(ArithOp),
    StackOp(StackOp),
    UserDefined(String),
}

#[derive(Debug)]
pub struct Calculator {
    stack: Stack,
    words: HashMap<String, Word>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        let mut words = HashMap::new();
        for (name, op) in [
            ("+", ArithOp::Add),
            ("-", ArithOp::Subtract),
            ("*", ArithOp::Multiply),
            ("/", ArithOp::Divide),
        ] {
            words.insert(name.to_string(), Word::Arithmetic(op));
        }
        for (name, op) in [
            ("drop", StackOp::Drop),
            ("swap", StackOp::Swap),
            ("dup", StackOp::Dup),
            ("over", StackOp::Over),
        ] {
            words.insert(name.to_string(), Word::StackOp(op));
        }
        Self {
            stack: Stack::new(),
            words,
        }
    }

    /// Evaluates one line of input and returns the stack, bottom to top.
    ///
    /// The line is split on `;`: every segment but the last may introduce a
    /// word definition (`: name body`), and only the last segment is executed
    /// as an expression. Non-definition segments before the last are ignored.
    pub fn evaluate(&mut self, input: &str) -> Result<Vec<i64>, CalcError> {
        self.eval_line(input, 0)?;
        Ok(self.stack.contents())
    }

    fn eval_line(&mut self, input: &str, depth: usize) -> Result<(), CalcError> {
        if depth > MAX_WORD_DEPTH {
            return Err(CalcError::RecursionLimit);
        }
        let input = input.to_lowercase();
        let segments: Vec<&str> = input.split(';').collect();
        if let Some((expression, definitions)) = segments.split_last() {
            for segment in definitions {
                self.define_word(segment)?;
            }
            self.run_segment(expression, depth)?;
        }
        Ok(())
    }

    /// Registers `: name body` from one segment. Segments that do not start
    /// with `:` are not definitions and are skipped.
    fn define_word(&mut self, segment: &str) -> Result<(), CalcError> {
        let segment = segment.trim();
        let declaration = match segment.strip_prefix(':') {
            Some(rest) => rest.trim(),
            None => return Ok(()),
        };
        match declaration.split_once(char::is_whitespace) {
            Some((name, body)) => {
                // last definition wins; built-ins may be shadowed
                self.words
                    .insert(name.to_string(), Word::UserDefined(body.trim().to_string()));
                Ok(())
            }
            None => Err(CalcError::InvalidDefinition(segment.to_string())),
        }
    }

    fn run_segment(&mut self, segment: &str, depth: usize) -> Result<(), CalcError> {
        for token in segment.split_whitespace() {
            if token.bytes().all(|b| b.is_ascii_digit()) {
                let literal = token
                    .parse()
                    .map_err(|_| CalcError::UndefinedOperation(token.to_string()))?;
                self.stack.push(literal);
                continue;
            }
            let word = match self.words.get(token) {
                Some(word) => word.clone(),
                None => return Err(CalcError::UndefinedOperation(token.to_string())),
            };
            match word {
                Word::Arithmetic(op) => op.eval(&mut self.stack)?,
                Word::StackOp(op) => op.eval(&mut self.stack)?,
                // side effects land on the shared stack; the nested
                // result is the stack itself, so nothing to collect
                Word::UserDefined(body) => self.eval_line(&body, depth + 1)?,
            }
        }
        Ok(())
    }
}
