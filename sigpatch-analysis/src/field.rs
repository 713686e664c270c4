//! Identifying a field of a matched class when its name is unusable.
//!
//! Three strategies are available: a unique-type match, an evidence tally
//! over the class's methods, and a marker-string proximity scan.

use sigpatch_model::{Class, FieldRef, TypeDesc};

use crate::evidence::Evidence;

/// Why a strategy failed to pick a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Unresolved {
    #[error("no candidate field")]
    NotFound,
    #[error("{0} candidate fields, expected exactly one")]
    Ambiguous(usize),
}

/// Select the only field of `class` whose type is `ty`.
pub fn by_unique_type(class: &Class, ty: &TypeDesc) -> Result<FieldRef, Unresolved> {
    let mut candidates = class.field_refs().filter(|f| &f.ty == ty);
    match (candidates.next(), candidates.count()) {
        (None, _) => Err(Unresolved::NotFound),
        (Some(field), 0) => Ok(field),
        (Some(_), rest) => Err(Unresolved::Ambiguous(rest + 1)),
    }
}

/// Per-field evidence totals in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTally {
    entries: Vec<(FieldRef, u32)>,
}

impl FieldTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tally the integer-typed fields of `class` read by its diagnostic
    /// methods, each read weighted by the reading method's score.
    pub fn of_class(class: &Class) -> Self {
        let mut tally = Self::new();
        for method in &class.methods {
            let score = Evidence::collect(method.instructions()).score();
            if score == 0 {
                continue;
            }
            for field in method.instructions().iter().filter_map(|i| i.field_read()) {
                if field.owner == class.ty
                    && (field.ty.is_narrow_integer() || field.ty.is_boxed_integer())
                {
                    tally.add(field, score);
                }
            }
        }
        tally
    }

    pub fn add(&mut self, field: &FieldRef, score: u32) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some((_, total)) => *total += score,
            None => self.entries.push((field.clone(), score)),
        }
    }

    pub fn get(&self, field: &FieldRef) -> u32 {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map_or(0, |(_, total)| *total)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldRef, u32)> {
        self.entries.iter().map(|(f, total)| (f, *total))
    }

    /// Highest total; among equal totals the earliest entry.
    pub fn winner(&self) -> Option<&FieldRef> {
        let mut best: Option<&(FieldRef, u32)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(f, _)| f)
    }
}

pub fn by_evidence_tally(class: &Class) -> Result<FieldRef, Unresolved> {
    let tally = FieldTally::of_class(class);
    for (field, total) in tally.iter() {
        log::debug!("tally {field}: {total}");
    }
    tally.winner().cloned().ok_or(Unresolved::NotFound)
}

/// Find the first boolean field read within `window` instructions after a
/// string load of `marker`.
///
/// Methods are scanned in declaration order and every marker occurrence is
/// tried until one has a boolean read in range.
pub fn by_string_proximity(
    class: &Class,
    marker: &str,
    window: usize,
) -> Result<FieldRef, Unresolved> {
    for method in &class.methods {
        let code = method.instructions();
        for (i, insn) in code.iter().enumerate() {
            if insn.string() != Some(marker) {
                continue;
            }
            let end = code.len().min(i.saturating_add(window).saturating_add(1));
            let found = code[i + 1..end]
                .iter()
                .find(|next| next.opcode().is_boolean_field_read())
                .and_then(|next| next.field());
            if let Some(field) = found {
                log::debug!("{marker:?} in {} is followed by {field}", method.name);
                return Ok(field.clone());
            }
        }
    }
    Err(Unresolved::NotFound)
}

/// The subscription tier field: unique boxed integer, else the tally winner.
pub fn identify_tier_field(class: &Class) -> Result<FieldRef, Unresolved> {
    by_unique_type(class, &TypeDesc::boxed_integer()).or_else(|reason| {
        log::debug!("type match on {} failed ({reason}), tallying evidence", class.ty);
        by_evidence_tally(class)
    })
}
