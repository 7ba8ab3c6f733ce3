//! Text front-end for variable, domain and constraint declarations.
//!
//! Declarations are comma-separated lists. Names are trimmed and inner
//! spaces become underscores, so `" a b , c"` declares `a_b` and `c`.
//! Domain lists additionally accept inclusive ranges `[1-9]` and `[A-F]`.
//! Variable names must not contain comparator characters.

use crate::error::ParseError;
use crate::model::{Comparator, Domain, RawConstraint, Variable};

/// Largest number of values a single numeric range may expand to.
pub const MAX_RANGE_LEN: i64 = 100_000;

fn is_comparator_char(c: char) -> bool {
    matches!(c, '=' | '!' | '<' | '>')
}

/// Parses a comma-separated list of variable names.
///
/// # Examples
///
/// ```
/// let vars = u_csp::parse::parse_variables("A, B, long name").unwrap();
/// assert_eq!(vars[2].name, "long_name");
/// ```
pub fn parse_variables(input: &str) -> Result<Vec<Variable>, ParseError> {
    let names = split_names(input);
    check_names("variable", &names)?;
    if let Some(name) = names.iter().find(|n| n.contains(is_comparator_char)) {
        return Err(ParseError::ReservedCharacter(name.clone()));
    }
    Ok(names.into_iter().map(Variable::new).collect())
}

/// Parses a comma-separated list of domain values.
///
/// Ranges are expanded in place. When every value is a non-negative integer
/// the integer is the order key and input order is kept; otherwise values
/// are sorted and ordered by position.
///
/// # Examples
///
/// ```
/// let domains = u_csp::parse::parse_domains("[A-C]").unwrap();
/// let names: Vec<_> = domains.iter().map(|d| d.name.as_str()).collect();
/// assert_eq!(names, ["A", "B", "C"]);
/// assert_eq!(domains[2].order, 2);
/// ```
pub fn parse_domains(input: &str) -> Result<Vec<Domain>, ParseError> {
    let mut values = Vec::new();
    for item in split_names(input) {
        match expand_range(&item)? {
            Some(expanded) => values.extend(expanded),
            None => values.push(item),
        }
    }
    check_names("domain", &values)?;

    let numeric: Option<Vec<i64>> = values
        .iter()
        .map(|v| {
            if v.bytes().all(|b| b.is_ascii_digit()) {
                v.parse().ok()
            } else {
                None
            }
        })
        .collect();

    Ok(match numeric {
        Some(orders) => values
            .into_iter()
            .zip(orders)
            .map(|(name, order)| Domain::new(name, order))
            .collect(),
        None => {
            values.sort();
            values
                .into_iter()
                .enumerate()
                .map(|(i, name)| Domain::new(name, i as i64))
                .collect()
        }
    })
}

/// Parses `"X <op> Y"` against the given variables.
pub fn parse_constraint(text: &str, variables: &[Variable]) -> Result<RawConstraint, ParseError> {
    let is_op = is_comparator_char;
    let malformed = || ParseError::MalformedConstraint(text.to_owned());

    let start = text.find(is_op).ok_or_else(malformed)?;
    let end = text[start..]
        .find(|c: char| !is_op(c))
        .map_or(text.len(), |offset| start + offset);

    let comparator: Comparator = text[start..end].parse()?;
    let lookup = |name: &str| {
        let name = name.trim().replace(' ', "_");
        if name.is_empty() {
            return Err(malformed());
        }
        variables
            .iter()
            .position(|v| v.name == name)
            .map(crate::model::VarId)
            .ok_or(ParseError::UnknownVariable(name))
    };

    Ok(RawConstraint::new(
        lookup(&text[..start])?,
        comparator,
        lookup(&text[end..])?,
    ))
}

fn split_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().replace(' ', "_"))
        .collect()
}

fn check_names(kind: &'static str, names: &[String]) -> Result<(), ParseError> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ParseError::EmptyName { kind });
        }
        if !seen.insert(name.as_str()) {
            return Err(ParseError::Duplicate {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}

/// Expands `[n-m]` or `[A-F]`; returns `None` for anything that is not a range.
fn expand_range(item: &str) -> Result<Option<Vec<String>>, ParseError> {
    let Some(inner) = item.strip_prefix('[').and_then(|s| s.strip_suffix(']')) else {
        return Ok(None);
    };
    let Some((lo, hi)) = inner.split_once('-') else {
        return Ok(None);
    };
    let invalid = || ParseError::InvalidRange(item.to_owned());

    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if is_number(lo) && is_number(hi) {
        let lo: i64 = lo.parse().map_err(|_| invalid())?;
        let hi: i64 = hi.parse().map_err(|_| invalid())?;
        if lo > hi || hi - lo >= MAX_RANGE_LEN {
            return Err(invalid());
        }
        return Ok(Some((lo..=hi).map(|n| n.to_string()).collect()));
    }

    let single_letter = |s: &str| {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Some(c),
            _ => None,
        }
    };
    match (single_letter(lo), single_letter(hi)) {
        (Some(lo), Some(hi)) if lo <= hi && lo.is_ascii_uppercase() == hi.is_ascii_uppercase() => {
            Ok(Some((lo..=hi).map(String::from).collect()))
        }
        (Some(_), Some(_)) => Err(invalid()),
        _ => Ok(None),
    }
}
