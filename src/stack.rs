use crate::error::CalcError;

/// LIFO operand stack. Owned by one `Calculator`, never shared.
#[derive(Debug, Default)]
pub struct Stack {
    items: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, value: i64) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<i64, CalcError> {
        match self.items.pop() {
            Some(value) => Ok(value),
            None => Err(CalcError::StackUnderflow),
        }
    }

    /// Pops the top two items as (top, next-from-top). Underflows as a unit:
    /// either both items come off or the stack is left untouched.
    pub fn pop2(&mut self) -> Result<(i64, i64), CalcError> {
        if self.items.len() < 2 {
            return Err(CalcError::StackUnderflow);
        }
        match (self.items.pop(), self.items.pop()) {
            (Some(v1), Some(v2)) => Ok((v1, v2)),
            _ => Err(CalcError::StackUnderflow),
        }
    }

    pub fn peek(&self) -> Option<i64> {
        self.items.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Snapshot of the stack, bottom to top.
    pub fn contents(&self) -> Vec<i64> {
        self.items.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(Err(CalcError::StackUnderflow), stack.pop());
    }

    #[test]
    fn pop2_needs_two_items() {
        let mut stack = Stack::new();
        stack.push(1);
        assert_eq!(Err(CalcError::StackUnderflow), stack.pop2());
        // the lone item survives the failed pop2
        assert_eq!(Some(1), stack.peek());
    }

    #[test]
    fn pop2_returns_top_then_next() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        assert_eq!(Ok((2, 1)), stack.pop2());
        assert!(stack.is_empty());
    }

    #[test]
    fn peek_leaves_stack_intact() {
        let mut stack = Stack::new();
        stack.push(7);
        assert_eq!(Some(7), stack.peek());
        assert_eq!(1, stack.len());
    }

    proptest! {
        #[test]
        fn pops_reverse_pushes(values in proptest::collection::vec(any::<i64>(), 0..64)) {
            let mut stack = Stack::new();
            for &v in &values {
                stack.push(v);
            }
            prop_assert_eq!(values.clone(), stack.contents());
            for &v in values.iter().rev() {
                prop_assert_eq!(Ok(v), stack.pop());
            }
            prop_assert!(stack.is_empty());
        }
    }
}
