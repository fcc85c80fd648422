use crate::error::{Error, Result};
use crate::value::Value;
use boolector::option::{BtorOption, ModelGen, NumberFormat};
use boolector::{Btor, SolverResult, BV};
use std::sync::Arc;

pub type BitVec = BV<Arc<Btor>>;

/// the class every recovered flag byte has to be in
pub const PRINTABLE: &str = "[ -~]";

#[derive(Debug, Clone)]
pub struct Solver {
    pub btor: Arc<Btor>,
    pub assertions: Vec<BitVec>,
    pub indexes: Vec<usize>,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        let btor = Arc::new(Btor::new());
        btor.set_opt(BtorOption::ModelGen(ModelGen::Disabled));
        btor.set_opt(BtorOption::Incremental(true));
        btor.set_opt(BtorOption::OutputNumberFormat(NumberFormat::Hexadecimal));

        Solver {
            btor,
            assertions: Vec::with_capacity(64),
            indexes: Vec::with_capacity(16),
        }
    }

    pub fn apply_assertions(&self) {
        for assertion in &self.assertions {
            assertion.assert();
        }
    }

    #[inline]
    pub fn bv(&self, s: &str, n: u32) -> BitVec {
        BV::new(self.btor.clone(), n, Some(s))
    }

    #[inline]
    pub fn bvv(&self, v: u64, n: u32) -> BitVec {
        if n <= 64 {
            BV::from_u64(self.btor.clone(), v, n)
        } else {
            BV::from_u64(self.btor.clone(), v, 64).uext(n - 64)
        }
    }

    /// new unconstrained symbol wrapped as a value
    #[inline]
    pub fn symbolic_value(&self, s: &str, n: u32) -> Value {
        Value::Symbolic(self.bv(s, n))
    }

    pub fn enable_model(&self, b: bool) {
        if b {
            self.btor.set_opt(BtorOption::ModelGen(ModelGen::All));
        } else {
            self.btor.set_opt(BtorOption::ModelGen(ModelGen::Disabled));
        }
    }

    pub fn eval(&self, value: &Value) -> Option<Value> {
        match value {
            Value::Concrete(val) => Some(Value::Concrete(*val)),
            Value::Symbolic(bv) => {
                self.enable_model(true);

                self.btor.push(1);
                self.apply_assertions();
                let sol = if self.btor.sat() == SolverResult::Sat {
                    bv.get_a_solution().as_u64().map(Value::Concrete)
                } else {
                    None
                };
                self.btor.pop(1);

                self.enable_model(false);

                sol
            }
        }
    }

    pub fn eval_to_u64(&self, value: &Value) -> Option<u64> {
        if let Some(Value::Concrete(val)) = self.eval(value) {
            Some(val)
        } else {
            None
        }
    }

    /// evaluate all the values against one model, so the bytes are consistent
    pub fn evaluate_bytes(&self, values: &[Value]) -> Option<Vec<u8>> {
        self.enable_model(true);

        self.btor.push(1);
        self.apply_assertions();
        let sol = if self.btor.sat() == SolverResult::Sat {
            values
                .iter()
                .map(|value| match value {
                    Value::Concrete(val) => Some(*val as u8),
                    Value::Symbolic(bv) => bv.get_a_solution().as_u64().map(|v| v as u8),
                })
                .collect()
        } else {
            None
        };
        self.btor.pop(1);

        self.enable_model(false);
        sol
    }

    #[inline]
    pub fn push(&mut self) {
        self.indexes.push(self.assertions.len());
        self.btor.push(1)
    }

    #[inline]
    pub fn pop(&mut self) {
        self.btor.pop(1);
        if let Some(index) = self.indexes.pop() {
            self.assertions.truncate(index);
        }
    }

    #[inline]
    pub fn assert_bv(&mut self, bv: &BitVec) {
        self.assertions.push(bv.to_owned());
    }

    /// assert that the value is nonzero
    #[inline]
    pub fn assert(&mut self, value: &Value) {
        let cond = match value {
            Value::Concrete(val) => self.bvv((*val != 0) as u64, 1),
            Value::Symbolic(bv) => {
                let zero = self.bvv(0, bv.get_width());
                bv._eq(&zero).not()
            }
        };
        self.assertions.push(cond);
    }

    #[inline]
    pub fn is_sat(&self) -> bool {
        if self.assertions.is_empty() {
            true
        } else {
            self.btor.push(1);
            self.apply_assertions();
            let sat = self.btor.sat() == SolverResult::Sat;
            self.btor.pop(1);
            sat
        }
    }

    /// constrain bytes of bitvector to be an exact string eg. "ABC"
    /// or use "[...]" to match a simple pattern eg. "[XYZa-z0-9]"
    pub fn constrain_bytes(&mut self, bv: &BitVec, pattern: &str) -> Result<()> {
        let width = (bv.get_width() / 8) as usize;
        if !pattern.starts_with('[') || !pattern.ends_with(']') {
            if pattern.len() > width {
                return Err(Error::Usage(format!(
                    "pattern \"{}\" is longer than {} byte(s)",
                    pattern, width
                )));
            }
            for (i, c) in pattern.bytes().enumerate() {
                let byte = bv.slice(8 * (i as u32 + 1) - 1, 8 * i as u32);
                self.assert_bv(&byte._eq(&self.bvv(c as u64, 8)));
            }
            return Ok(());
        }
        if pattern.len() < 3 {
            return Err(Error::Usage(format!("empty byte class \"{}\"", pattern)));
        }

        let class = &pattern.as_bytes()[1..pattern.len() - 1];
        let mut assertions = Vec::with_capacity(class.len());

        for ind in 0..bv.get_width() / 8 {
            assertions.clear();
            let s = bv.slice(8 * (ind + 1) - 1, 8 * ind);

            let mut i = 0;
            while i < class.len() {
                let c = class[i] as u64;
                if i + 2 < class.len() && class[i + 1] == b'-' {
                    let n = class[i + 2] as u64;
                    i += 3;
                    assertions.push(s.ugte(&self.bvv(c, 8)).and(&s.ulte(&self.bvv(n, 8))));
                } else {
                    i += 1;
                    assertions.push(s._eq(&self.bvv(c, 8)));
                }
            }

            let any = self.or_all(&assertions);
            self.assert_bv(&any);
        }
        Ok(())
    }

    pub fn constrain_bytes_value(&mut self, value: &Value, pattern: &str) -> Result<()> {
        match value {
            Value::Symbolic(bv) => self.constrain_bytes(bv, pattern),
            Value::Concrete(_) => Ok(()),
        }
    }

    // this should just be called "any"
    pub fn or_all(&self, bvs: &[BitVec]) -> BitVec {
        let mut bv = BV::from_bool(self.btor.clone(), false);
        for next_bv in bvs {
            bv = bv.or(next_bv);
        }
        bv
    }
}
