//! `<filter>` compilation, including any/all link conditions.

use super::condition::compile_condition;
use super::context::Compilation;
use super::relationship::resolve;
use crate::error::ConvertError;
use crate::error::UnsupportedError;
use crate::query::fetchxml::Condition;
use crate::query::fetchxml::EntityNode;
use crate::query::fetchxml::Filter;
use crate::query::fetchxml::FilterType;
use crate::query::fetchxml::LinkEntity;
use crate::query::odata::ODataFilterClause;
use crate::query::odata::join_filters;

/// Compiles the non-empty filters of an entity.
pub(crate) fn compile_filters(
    ctx: &mut Compilation<'_>,
    entity: &str,
    filters: &[Filter],
    nav: &str,
) -> Result<Vec<ODataFilterClause>, ConvertError> {
    filters
        .iter()
        .filter(|f| !f.is_empty())
        .map(|f| compile_filter(ctx, entity, f, nav))
        .collect()
}

fn compile_filter(
    ctx: &mut Compilation<'_>,
    entity: &str,
    filter: &Filter,
    nav: &str,
) -> Result<ODataFilterClause, ConvertError> {
    let mut clause = ODataFilterClause::new(filter.filter_type == FilterType::And);

    for condition in &filter.conditions {
        clause.conditions.push(compile_condition(ctx, entity, condition, nav)?);
    }

    for link in &filter.links {
        clause.conditions.push(compile_link_condition(ctx, entity, link, nav)?);
    }

    for nested in &filter.filters {
        clause.filters.push(compile_filter(ctx, entity, nested, nav)?);
    }

    Ok(clause)
}

/// Compiles a link-entity inside a filter to an `any` or `all` expression.
fn compile_link_condition(
    ctx: &mut Compilation<'_>,
    entity: &str,
    link: &LinkEntity,
    nav: &str,
) -> Result<String, ConvertError> {
    let Some(lambda) = link.link_type.lambda() else {
        return Err(UnsupportedError::LinkTypeInFilter {
            link_type: link.link_type.to_string(),
        }
        .into());
    };

    let variable = ctx.next_lambda_variable();
    let navigation = resolve(ctx, entity, link)?;
    let target = navigation.target;

    let filters = if link.link_type.is_negated() {
        target
            .filters()
            .iter()
            .map(invert_filter)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        target.filters().to_vec()
    };

    let inner_nav = format!("{}/", variable);
    let clauses = compile_filters(ctx, target.name(), &filters, &inner_nav)?;

    let not = if link.link_type.is_negated() { "not " } else { "" };
    let body = match join_filters(&clauses) {
        Some(joined) => format!("{}:{}", variable, joined),
        None => String::new(),
    };

    Ok(format!("{}{}{}/{}({})", not, nav, navigation.property, lambda, body))
}

/// Returns the logical complement of a filter.
///
/// Swaps `and` and `or`, replaces every operator with its inverse and negates
/// nested any/all link-entities, at every level. The filters of nested
/// link-entities are left unchanged.
///
/// # Example
///
/// ```
/// use fetchxml_lib::convert::invert_filter;
/// use fetchxml_lib::query::fetchxml::{Condition, ConditionOperator, Filter, FilterType};
///
/// let filter = Filter::or().condition(Condition::new("name", ConditionOperator::Null));
/// let inverted = invert_filter(&filter).unwrap();
///
/// assert_eq!(inverted.filter_type, FilterType::And);
/// assert_eq!(inverted.conditions[0].operator, ConditionOperator::NotNull);
/// ```
pub fn invert_filter(filter: &Filter) -> Result<Filter, UnsupportedError> {
    let conditions = filter
        .conditions
        .iter()
        .map(|condition| -> Result<Condition, UnsupportedError> {
            let operator = condition
                .operator
                .inverse()
                .ok_or_else(|| UnsupportedError::NonInvertibleOperator {
                    operator: condition.operator.to_string(),
                })?;
            Ok(Condition {
                operator,
                ..condition.clone()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let links = filter
        .links
        .iter()
        .map(|link| -> Result<LinkEntity, UnsupportedError> {
            Ok(LinkEntity {
                link_type: link.link_type.negate()?,
                ..link.clone()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let filters = filter.filters.iter().map(invert_filter).collect::<Result<Vec<_>, _>>()?;

    Ok(Filter {
        filter_type: filter.filter_type.flip(),
        conditions,
        filters,
        links,
    })
}
