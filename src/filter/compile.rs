//! Compile a [`FilterExpression`] into parameterized SQL.
//!
//! Each node is compiled exactly once, into a single accumulator holding the
//! SQL text, the positional values and the referenced columns. Because the
//! three grow together in one pass, placeholder order and value order cannot
//! drift apart.

use std::collections::HashSet;

use super::ast::{FilterExpression, FilterValue, RadiusSearch, SqlValue};

/// Declination cutoff (degrees) above which the right-ascension bounding box
/// is dropped. A padded search circle whose |declination| reaches this close
/// to a pole spans too wide an RA range for the box to narrow anything; the
/// exact ANGULAR_DISTANCE check still applies. Tunable pre-filter constant,
/// not derived from the radius.
const POLAR_CUTOFF_DEG: f64 = 89.0;

/// The result of compiling a filter expression.
///
/// `sql` uses MySQL `?` placeholders whose textual order matches `values`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    sql: String,
    values: Vec<FilterValue>,
    columns: HashSet<String>,
}

impl CompiledCondition {
    /// The parameterized WHERE-clause SQL.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The positional values, in placeholder order.
    ///
    /// Boolean leaf values are normalized to `1`/`0` here.
    pub fn values(&self) -> Vec<SqlValue> {
        self.values.iter().map(SqlValue::from).collect()
    }

    /// Every `Table.Column` the condition references.
    pub fn columns(&self) -> &HashSet<String> {
        &self.columns
    }
}

/// Compile a filter expression into SQL, values and referenced columns.
///
/// Infallible: all validation happened when the expression was parsed.
pub fn compile(expr: &FilterExpression) -> CompiledCondition {
    let mut condition = CompiledCondition {
        sql: String::new(),
        values: Vec::new(),
        columns: HashSet::new(),
    };
    emit(expr, &mut condition);
    condition
}

fn emit(expr: &FilterExpression, out: &mut CompiledCondition) {
    match expr {
        FilterExpression::And(children) => emit_combinator(children, " AND ", out),
        FilterExpression::Or(children) => emit_combinator(children, " OR ", out),
        FilterExpression::Not(child) => {
            out.sql.push_str("NOT(");
            emit(child, out);
            out.sql.push(')');
        }
        FilterExpression::Comparison { op, column, value } => {
            out.sql
                .push_str(&format!("({} {} ?)", column.quoted(), op.sql()));
            out.values.push(value.clone());
            out.columns.insert(column.qualified_name());
        }
        FilterExpression::IsNull(column) => {
            out.sql.push_str(&format!("({} IS NULL)", column.quoted()));
            out.columns.insert(column.qualified_name());
        }
        FilterExpression::WithinRadius(search) => emit_within_radius(search, out),
    }
}

fn emit_combinator(children: &[FilterExpression], separator: &str, out: &mut CompiledCondition) {
    out.sql.push('(');
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            out.sql.push_str(separator);
        }
        emit(child, out);
    }
    out.sql.push(')');
}

/// Emit the circular sky-position search.
///
/// A cheap rectangular RA/Dec bounding box narrows candidates through column
/// indexes before the exact great-circle check runs. The box is padded with
/// `2 * radius`; near a pole the RA bound degenerates and only declination is
/// constrained. The exact check relies on an `ANGULAR_DISTANCE` function
/// (great-circle distance in degrees, haversine or Vincenty) that the target
/// database must provide as a UDF or stored function.
fn emit_within_radius(search: &RadiusSearch, out: &mut CompiledCondition) {
    let ra_col = search.right_ascension_column.quoted();
    let dec_col = search.declination_column.quoted();

    let pad = 2.0 * search.radius;
    let upper_abs_declination = search.declination.abs() + pad;

    out.sql.push('(');

    if upper_abs_declination < POLAR_CUTOFF_DEG {
        // RA half-width grows with 1/cos(dec) as circles of constant angular
        // radius cover more right ascension at higher declination.
        let d_ra = search.radius / upper_abs_declination.to_radians().cos();
        let min_ra = search.right_ascension - d_ra;
        let max_ra = search.right_ascension + d_ra;

        if min_ra < 0.0 {
            // Box wraps past 0 degrees.
            out.sql.push_str(&format!(
                "(({ra_col} BETWEEN ? AND ?) OR ({ra_col} BETWEEN ? AND ?))"
            ));
            out.values.push(FilterValue::Float(0.0));
            out.values.push(FilterValue::Float(max_ra));
            out.values.push(FilterValue::Float(360.0 + min_ra));
            out.values.push(FilterValue::Float(360.0));
        } else if max_ra > 360.0 {
            // Box wraps past 360 degrees.
            out.sql.push_str(&format!(
                "(({ra_col} BETWEEN ? AND ?) OR ({ra_col} BETWEEN ? AND ?))"
            ));
            out.values.push(FilterValue::Float(0.0));
            out.values.push(FilterValue::Float(max_ra - 360.0));
            out.values.push(FilterValue::Float(min_ra));
            out.values.push(FilterValue::Float(360.0));
        } else {
            out.sql.push_str(&format!("({ra_col} BETWEEN ? AND ?)"));
            out.values.push(FilterValue::Float(min_ra));
            out.values.push(FilterValue::Float(max_ra));
        }

        out.sql.push_str(&format!(" AND ({dec_col} BETWEEN ? AND ?)"));
        out.values.push(FilterValue::Float(search.declination - pad));
        out.values.push(FilterValue::Float(search.declination + pad));
    } else {
        // The padded circle approaches a celestial pole: every right
        // ascension may fall inside it, so only declination is bounded.
        out.sql.push_str(&format!("({dec_col} BETWEEN ? AND ?)"));
        out.values
            .push(FilterValue::Float((search.declination - pad).max(-90.0)));
        out.values
            .push(FilterValue::Float((search.declination + pad).min(90.0)));
    }

    out.sql.push_str(&format!(
        " AND ANGULAR_DISTANCE({dec_col}, {ra_col}, ?, ?) <= ?"
    ));
    out.values.push(FilterValue::Float(search.declination));
    out.values.push(FilterValue::Float(search.right_ascension));
    out.values.push(FilterValue::Float(search.radius));

    out.sql.push(')');

    out.columns
        .insert(search.right_ascension_column.qualified_name());
    out.columns
        .insert(search.declination_column.qualified_name());
}
