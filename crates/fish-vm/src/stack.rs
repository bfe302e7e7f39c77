//! The stack machine: active stack, register and stack-of-stacks.
//!
//! `[` archives the active stack together with its register and starts a new
//! one; `]` folds the active stack back into the archived one. Only the
//! active pair is ever visible to instructions.

use log::debug;

use crate::error::RuntimeError;
use crate::value::as_index;

/// An archived stack and its register.
#[derive(Clone, Debug, Default, PartialEq)]
struct Frame {
    values: Vec<f64>,
    register: Option<f64>,
}

/// A stack manipulation instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackOp {
    /// `:`
    Duplicate,
    /// `~`
    Drop,
    /// `$`
    Swap,
    /// `@`
    Rotate,
    /// `}`
    ShiftRight,
    /// `{`
    ShiftLeft,
    /// `r`
    Reverse,
    /// `l`
    Length,
    /// `[`
    NewStack,
    /// `]`
    EndStack,
    /// `&`
    Register,
}

impl StackOp {
    pub fn from_char(c: char) -> Option<StackOp> {
        let op = match c {
            ':' => StackOp::Duplicate,
            '~' => StackOp::Drop,
            '$' => StackOp::Swap,
            '@' => StackOp::Rotate,
            '}' => StackOp::ShiftRight,
            '{' => StackOp::ShiftLeft,
            'r' => StackOp::Reverse,
            'l' => StackOp::Length,
            '[' => StackOp::NewStack,
            ']' => StackOp::EndStack,
            '&' => StackOp::Register,
            _ => return None,
        };
        Some(op)
    }
}

/// The program's stacks and register.
#[derive(Clone, Debug, Default)]
pub struct StackMachine {
    active: Frame,
    archive: Vec<Frame>,
}

impl StackMachine {
    /// Create an empty stack machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stack machine whose active stack holds `values` (bottom first).
    pub fn with_values(values: &[f64]) -> Self {
        Self {
            active: Frame {
                values: values.to_vec(),
                register: None,
            },
            archive: Vec::new(),
        }
    }

    /// Number of values on the active stack.
    pub fn len(&self) -> usize {
        self.active.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.values.is_empty()
    }

    /// Values of the active stack, bottom to top.
    pub fn as_slice(&self) -> &[f64] {
        &self.active.values
    }

    /// Register of the active stack.
    pub fn register(&self) -> Option<f64> {
        self.active.register
    }

    /// Number of archived stacks beneath the active one.
    pub fn depth(&self) -> usize {
        self.archive.len()
    }

    pub fn push(&mut self, value: f64) {
        self.active.values.push(value);
    }

    pub fn pop(&mut self) -> Result<f64, RuntimeError> {
        self.active
            .values
            .pop()
            .ok_or(RuntimeError::underflow(1, 0))
    }

    /// Pop the top two values, returned as `(top, second)`.
    pub fn pop2(&mut self) -> Result<(f64, f64), RuntimeError> {
        self.require(2)?;
        let x = self.pop()?;
        let y = self.pop()?;
        Ok((x, y))
    }

    pub(crate) fn require(&self, needed: usize) -> Result<(), RuntimeError> {
        let available = self.len();
        if available < needed {
            return Err(RuntimeError::underflow(needed, available));
        }
        Ok(())
    }

    /// Execute a stack manipulation instruction.
    pub fn apply(&mut self, op: StackOp) -> Result<(), RuntimeError> {
        match op {
            StackOp::Duplicate => self.dup(),
            StackOp::Drop => self.drop_top(),
            StackOp::Swap => self.swap(),
            StackOp::Rotate => self.rot(),
            StackOp::ShiftRight => self.shift_right(),
            StackOp::ShiftLeft => self.shift_left(),
            StackOp::Reverse => {
                self.reverse();
                Ok(())
            }
            StackOp::Length => {
                self.push_length();
                Ok(())
            }
            StackOp::NewStack => self.new_substack(),
            StackOp::EndStack => {
                self.end_substack();
                Ok(())
            }
            StackOp::Register => self.toggle_register(),
        }
    }

    /// Duplicate the top value (`:`).
    pub fn dup(&mut self) -> Result<(), RuntimeError> {
        let top = self.pop()?;
        self.push(top);
        self.push(top);
        Ok(())
    }

    /// Discard the top value (`~`).
    pub fn drop_top(&mut self) -> Result<(), RuntimeError> {
        self.pop().map(|_| ())
    }

    /// Swap the top two values (`$`).
    pub fn swap(&mut self) -> Result<(), RuntimeError> {
        self.require(2)?;
        let len = self.len();
        self.active.values.swap(len - 1, len - 2);
        Ok(())
    }

    /// Move the third value to the top (`@`): 1,2,3,4 -> 1,4,2,3.
    pub fn rot(&mut self) -> Result<(), RuntimeError> {
        self.require(3)?;
        let len = self.len();
        self.active.values[len - 3..].rotate_right(1);
        Ok(())
    }

    /// Move the top value to the bottom (`}`): 1,2,3,4 -> 4,1,2,3.
    pub fn shift_right(&mut self) -> Result<(), RuntimeError> {
        self.require(1)?;
        self.active.values.rotate_right(1);
        Ok(())
    }

    /// Move the bottom value to the top (`{`): 1,2,3,4 -> 2,3,4,1.
    pub fn shift_left(&mut self) -> Result<(), RuntimeError> {
        self.require(1)?;
        self.active.values.rotate_left(1);
        Ok(())
    }

    /// Reverse the active stack (`r`).
    pub fn reverse(&mut self) {
        self.active.values.reverse();
    }

    /// Push the length of the active stack (`l`).
    pub fn push_length(&mut self) {
        let len = self.len() as f64;
        self.push(len);
    }

    /// Split the top `n` values off into a new stack (`[`).
    ///
    /// The count is popped first; the `n` values keep their order on the new
    /// stack and the new stack starts with an empty register.
    pub fn new_substack(&mut self) -> Result<(), RuntimeError> {
        let raw = self.pop()?;
        let n = as_index(raw).ok_or(RuntimeError::InvalidSubstackSize(raw))?;
        self.require(n)?;

        let split = self.len() - n;
        let values = self.active.values.split_off(split);
        let parent = std::mem::replace(
            &mut self.active,
            Frame {
                values,
                register: None,
            },
        );
        self.archive.push(parent);
        debug!("opened substack of {} value(s) at depth {}", n, self.depth());
        Ok(())
    }

    /// Fold the active stack back into its parent (`]`).
    ///
    /// With no parent the active stack and register are cleared instead.
    pub fn end_substack(&mut self) {
        match self.archive.pop() {
            Some(parent) => {
                let child = std::mem::replace(&mut self.active, parent);
                debug!(
                    "closed substack returning {} value(s) to depth {}",
                    child.values.len(),
                    self.depth()
                );
                self.active.values.extend(child.values);
            }
            None => {
                self.active = Frame::default();
            }
        }
    }

    /// Move a value between the stack and the register (`&`).
    pub fn toggle_register(&mut self) -> Result<(), RuntimeError> {
        match self.active.register.take() {
            Some(value) => self.push(value),
            None => {
                let value = self.pop()?;
                self.active.register = Some(value);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn machine(values: &[f64]) -> StackMachine {
        StackMachine::with_values(values)
    }

    #[test]
    fn push_pop() {
        let mut stack = StackMachine::new();
        assert!(stack.is_empty());
        stack.push(1.0);
        stack.push(2.0);
        assert_eq!(stack.pop(), Ok(2.0));
        assert_eq!(stack.pop(), Ok(1.0));
        assert_eq!(stack.pop(), Err(RuntimeError::underflow(1, 0)));
    }

    #[test]
    fn pop2_order_and_underflow() {
        let mut stack = machine(&[7.0, 3.0]);
        assert_eq!(stack.pop2(), Ok((3.0, 7.0)));

        let mut stack = machine(&[1.0]);
        assert_eq!(stack.pop2(), Err(RuntimeError::underflow(2, 1)));
        // Nothing was consumed.
        assert_eq!(stack.as_slice(), &[1.0]);
    }

    #[test]
    fn dup_and_drop() {
        let mut stack = machine(&[5.0]);
        stack.dup().unwrap();
        assert_eq!(stack.as_slice(), &[5.0, 5.0]);
        stack.drop_top().unwrap();
        assert_eq!(stack.as_slice(), &[5.0]);

        let mut empty = StackMachine::new();
        assert!(empty.dup().is_err());
        assert!(empty.drop_top().is_err());
    }

    #[test]
    fn swap() {
        let mut stack = machine(&[1.0, 2.0, 3.0]);
        stack.swap().unwrap();
        assert_eq!(stack.as_slice(), &[1.0, 3.0, 2.0]);
        assert!(machine(&[1.0]).swap().is_err());
    }

    #[test]
    fn rot() {
        let mut stack = machine(&[1.0, 2.0, 3.0, 4.0]);
        stack.rot().unwrap();
        assert_eq!(stack.as_slice(), &[1.0, 4.0, 2.0, 3.0]);
        assert_eq!(
            machine(&[1.0, 2.0]).rot(),
            Err(RuntimeError::underflow(3, 2))
        );
    }

    #[test]
    fn shifts() {
        let mut stack = machine(&[1.0, 2.0, 3.0, 4.0]);
        stack.shift_right().unwrap();
        assert_eq!(stack.as_slice(), &[4.0, 1.0, 2.0, 3.0]);

        let mut stack = machine(&[1.0, 2.0, 3.0, 4.0]);
        stack.shift_left().unwrap();
        assert_eq!(stack.as_slice(), &[2.0, 3.0, 4.0, 1.0]);

        assert!(StackMachine::new().shift_right().is_err());
        assert!(StackMachine::new().shift_left().is_err());
    }

    #[test]
    fn reverse_and_length() {
        let mut stack = machine(&[1.0, 2.0, 3.0]);
        stack.reverse();
        assert_eq!(stack.as_slice(), &[3.0, 2.0, 1.0]);
        stack.push_length();
        assert_eq!(stack.as_slice(), &[3.0, 2.0, 1.0, 3.0]);

        let mut empty = StackMachine::new();
        empty.reverse();
        empty.push_length();
        assert_eq!(empty.as_slice(), &[0.0]);
    }

    #[test]
    fn new_substack_keeps_order() {
        let mut stack = machine(&[1.0, 2.0, 3.0, 4.0, 2.0]);
        stack.toggle_register().unwrap();
        stack.push(2.0);
        stack.new_substack().unwrap();

        assert_eq!(stack.as_slice(), &[3.0, 4.0]);
        assert_eq!(stack.register(), None);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn new_substack_underflow() {
        let mut stack = machine(&[1.0, 5.0]);
        assert_eq!(
            stack.new_substack(),
            Err(RuntimeError::underflow(5, 1))
        );
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn new_substack_rejects_bad_counts() {
        assert_eq!(
            machine(&[-1.0]).new_substack(),
            Err(RuntimeError::InvalidSubstackSize(-1.0))
        );
        assert_eq!(
            machine(&[1.0, 0.5]).new_substack(),
            Err(RuntimeError::InvalidSubstackSize(0.5))
        );
    }

    #[test]
    fn end_substack_returns_values_and_register() {
        // Register 9 belongs to the outer stack.
        let mut stack = machine(&[1.0, 9.0]);
        stack.toggle_register().unwrap();
        stack.push(2.0);
        stack.push(3.0);
        stack.push(2.0);
        stack.new_substack().unwrap();
        stack.push(4.0);
        stack.toggle_register().unwrap();
        assert_eq!(stack.register(), Some(4.0));

        stack.end_substack();
        assert_eq!(stack.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(stack.register(), Some(9.0));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn end_substack_without_parent_clears() {
        let mut stack = machine(&[1.0, 2.0]);
        stack.toggle_register().unwrap();
        stack.end_substack();
        assert!(stack.is_empty());
        assert_eq!(stack.register(), None);
    }

    #[test]
    fn register_round_trip() {
        let mut stack = machine(&[1.0, 2.0]);
        stack.apply(StackOp::Register).unwrap();
        assert_eq!(stack.as_slice(), &[1.0]);
        assert_eq!(stack.register(), Some(2.0));
        stack.apply(StackOp::Register).unwrap();
        assert_eq!(stack.as_slice(), &[1.0, 2.0]);
        assert_eq!(stack.register(), None);

        assert!(StackMachine::new().toggle_register().is_err());
    }

    #[test]
    fn decode_ops() {
        assert_eq!(StackOp::from_char(':'), Some(StackOp::Duplicate));
        assert_eq!(StackOp::from_char('&'), Some(StackOp::Register));
        assert_eq!(StackOp::from_char('+'), None);
    }

    proptest! {
        #[test]
        fn dup_then_drop_is_identity(values in prop::collection::vec(-1e6f64..1e6, 1..16)) {
            let mut stack = machine(&values);
            stack.dup().unwrap();
            stack.drop_top().unwrap();
            prop_assert_eq!(stack.as_slice(), values.as_slice());
        }

        #[test]
        fn substack_round_trip(
            values in prop::collection::vec(-1e6f64..1e6, 0..16),
            take in 0usize..16,
            register in prop::option::of(-1e6f64..1e6),
        ) {
            let take = take.min(values.len());
            let mut stack = machine(&values);
            if let Some(r) = register {
                stack.push(r);
                stack.toggle_register().unwrap();
            }
            let before = stack.as_slice().to_vec();

            stack.push(take as f64);
            stack.new_substack().unwrap();
            stack.end_substack();

            prop_assert_eq!(stack.as_slice(), before.as_slice());
            prop_assert_eq!(stack.register(), register);
        }
    }
}
