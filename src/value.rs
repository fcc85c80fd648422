use crate::solver::BitVec;
use boolector::BV;
use std::cmp::Ordering;
use std::ops;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Concrete(u64),
    Symbolic(BitVec),
}

impl Default for Value {
    fn default() -> Self {
        Value::Concrete(0)
    }
}

#[inline]
pub fn make_bv(bv: &BitVec, val: u64, n: u32) -> BitVec {
    BV::from_u64(bv.get_btor(), val, n)
}

// lift the concrete side to the symbolic width, zero extend the narrower
// of two symbolic operands
macro_rules! binary_ops {
    ($self:expr, $rhs:expr, $method:ident, $concrete:expr) => {
        match ($self, $rhs) {
            (Value::Concrete(a), Value::Concrete(b)) => Value::Concrete($concrete(*a, *b)),
            (Value::Symbolic(a), Value::Concrete(b)) => {
                let bv = make_bv(a, *b, a.get_width());
                Value::Symbolic(a.$method(&bv))
            }
            (Value::Concrete(a), Value::Symbolic(b)) => {
                let bv = make_bv(b, *a, b.get_width());
                Value::Symbolic(bv.$method(b))
            }
            (Value::Symbolic(a), Value::Symbolic(b)) => {
                let width_diff = a.get_width() as i32 - b.get_width() as i32;
                match width_diff.cmp(&0) {
                    Ordering::Equal => Value::Symbolic(a.$method(b)),
                    Ordering::Greater => Value::Symbolic(a.$method(&b.uext(width_diff as u32))),
                    Ordering::Less => Value::Symbolic(a.uext((-width_diff) as u32).$method(b)),
                }
            }
        }
    };
}

impl ops::Add<Value> for Value {
    type Output = Value;

    #[inline]
    fn add(self, rhs: Value) -> Value {
        binary_ops!(&self, &rhs, add, u64::wrapping_add)
    }
}

impl ops::Mul<Value> for Value {
    type Output = Value;

    #[inline]
    fn mul(self, rhs: Value) -> Value {
        binary_ops!(&self, &rhs, mul, u64::wrapping_mul)
    }
}

impl ops::BitXor<Value> for Value {
    type Output = Value;

    #[inline]
    fn bitxor(self, rhs: Value) -> Value {
        binary_ops!(&self, &rhs, xor, |a: u64, b: u64| a ^ b)
    }
}

impl Value {
    // get whether values are equivalent
    #[inline]
    pub fn eq(&self, rhs: &Value) -> Value {
        binary_ops!(self, rhs, _eq, |a: u64, b: u64| (a == b) as u64)
    }

    #[inline]
    pub fn ult(&self, rhs: &Value) -> Value {
        binary_ops!(self, rhs, ult, |a: u64, b: u64| (a < b) as u64)
    }

    #[inline]
    pub fn ulte(&self, rhs: &Value) -> Value {
        binary_ops!(self, rhs, ulte, |a: u64, b: u64| (a <= b) as u64)
    }

    #[inline]
    pub fn ugte(&self, rhs: &Value) -> Value {
        binary_ops!(self, rhs, ugte, |a: u64, b: u64| (a >= b) as u64)
    }

    /// zero extend a symbolic value by `bits`, concrete values are already 64 bit
    #[inline]
    pub fn uext(&self, bits: u32) -> Value {
        match self {
            Value::Concrete(_a) => self.to_owned(),
            Value::Symbolic(a) => Value::Symbolic(a.uext(bits)),
        }
    }

    #[inline]
    pub fn slice(&self, high: u32, low: u32) -> Value {
        match self {
            Value::Concrete(a) => {
                let mask = if (high - low) < 63 {
                    (1 << (high - low + 1)) - 1
                } else {
                    -1i64 as u64
                };
                Value::Concrete((*a >> low) & mask)
            }
            Value::Symbolic(a) => Value::Symbolic(a.slice(high, low)),
        }
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Concrete(a) => Some(*a),
            Value::Symbolic(a) => a.as_u64(),
        }
    }

    #[inline]
    pub fn is_concrete(&self) -> bool {
        matches!(self, Value::Concrete(_))
    }

    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    #[inline]
    pub fn size(&self) -> u32 {
        match self {
            Value::Concrete(_a) => 64,
            Value::Symbolic(a) => a.get_width(),
        }
    }
}

/// convenience method for making a `Value::Concrete`
#[inline]
pub fn vc(v: u64) -> Value {
    Value::Concrete(v)
}

/// convert bytes into vecs of values
#[inline]
pub fn byte_values<T: AsRef<[u8]>>(bytes: T) -> Vec<Value> {
    bytes.as_ref().iter().map(|b| vc(*b as u64)).collect()
}
