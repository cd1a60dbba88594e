use crate::filter::Filter;
use crate::operator::Operator;

/// Returns the first operator from `operators` used by any field filter in
/// `filters`, descending into composite filters at any depth.
///
/// The walk is depth-first, pre-order, left to right and stops at the first
/// hit. Callers should only rely on whether something was found, not on which
/// of several matching filters produced it.
pub fn find_filter_with_operator(filters: &[Filter], operators: &[Operator]) -> Option<Operator> {
    for filter in filters {
        match filter {
            Filter::Field(field) => {
                if operators.contains(&field.operator()) {
                    return Some(field.operator());
                }
            }
            Filter::Composite(composite) => {
                let found = find_filter_with_operator(composite.filters(), operators);
                if found.is_some() {
                    return found;
                }
            }
        }
    }
    None
}
