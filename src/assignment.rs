use crate::Variable;
use anyhow::{ensure, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{fmt, io, iter::FusedIterator};

pub const DEFAULT_MAX_VARIABLES: usize = 16;

#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Deref,
    derive_more::From,
    derive_more::IntoIterator,
)]
pub struct Assignment(pub Vec<(Variable, bool)>);

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.iter().map(|(v, b)| format!("{v}: {b}")).join(", ")
        )
    }
}

/// Iterator over all `2^n` assignments of `n` variables.
///
/// `true` comes before `false` and the first variable varies slowest.
#[derive(Debug, Clone)]
pub struct Assignments<'a> {
    variables: &'a [Variable],
    next: u64,
    end: u64,
}

impl<'a> Iterator for Assignments<'a> {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let i = self.next;
        self.next += 1;

        let n = self.variables.len();
        // bit (n - 1 - j) of the counter is 0 when variable j is true
        let values = self
            .variables
            .iter()
            .enumerate()
            .map(|(j, &v)| (v, (i >> (n - 1 - j)) & 1 == 0))
            .collect();
        Some(Assignment(values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = (self.end - self.next) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Assignments<'_> {}
impl FusedIterator for Assignments<'_> {}

pub fn check_enumerable(n: usize, limit: usize) -> Result<()> {
    ensure!(
        n <= limit,
        "{n} variables would produce 2^{n} combinations, above the limit of {limit} variables"
    );
    Ok(())
}

pub fn assignments(variables: &[Variable], limit: usize) -> Result<Assignments<'_>> {
    check_enumerable(variables.len(), limit)?;
    // `u64` counter caps the effective limit
    check_enumerable(variables.len(), 63)?;
    Ok(Assignments {
        variables,
        next: 0,
        end: 1 << variables.len(),
    })
}

/// Write the truth table of `variables` as CSV, one `T`/`F` column per variable.
///
/// Writes nothing for no variables: the single empty assignment has no cells.
pub fn truth_table(variables: &[Variable], limit: usize, out: impl io::Write) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    if variables.is_empty() {
        // a record with no fields cannot be written
        writer.flush()?;
        return Ok(());
    }
    writer.write_record(variables.iter().map(|v| v.to_string()))?;
    for assignment in assignments(variables, limit)? {
        writer.write_record(
            assignment
                .iter()
                .map(|&(_, b)| if b { "T" } else { "F" }),
        )?;
    }
    writer.flush()?;
    Ok(())
}
