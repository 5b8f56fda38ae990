//! Structural link-entities: `$expand` and inner join emulation.

use super::context::Compilation;
use super::filter::compile_filters;
use super::relationship::resolve;
use crate::error::ConvertError;
use crate::error::InputError;
use crate::error::UnsupportedError;
use crate::query::fetchxml::EntityNode;
use crate::query::fetchxml::LinkType;
use crate::query::odata::ODataFilterClause;
use crate::query::odata::ODataLinkClause;
use crate::query::odata::join_filters;

/// Returns the Web API property names of the selected attributes.
///
/// Empty when all attributes are selected.
pub(crate) fn compile_select<E: EntityNode + ?Sized>(
    ctx: &mut Compilation<'_>,
    node: &E,
) -> Result<Vec<String>, ConvertError> {
    if node.selects_all_attributes() {
        return Ok(Vec::new());
    }

    let metadata = ctx.entity(node.name())?;
    node.attributes()
        .iter()
        .map(|a| {
            metadata
                .attribute(&a.name)
                .map(|m| m.property_name())
                .ok_or_else(|| ConvertError::from(InputError::unknown_attribute(node.name(), &a.name)))
        })
        .collect()
}

/// Compiles the `$expand` items for the link-entities of `node`.
///
/// Outer joins and joins to a collection carry their filters inline. Filters
/// of single-valued inner joins are applied by [`compile_inner_join_filters`]
/// instead.
pub(crate) fn compile_joins<E: EntityNode + ?Sized>(
    ctx: &mut Compilation<'_>,
    node: &E,
) -> Result<Vec<ODataLinkClause>, ConvertError> {
    let mut expands = Vec::new();

    for link in node.links() {
        if link.link_type.lambda().is_some() {
            return Err(UnsupportedError::LinkTypeInJoin {
                link_type: link.link_type.to_string(),
            }
            .into());
        }

        if !link.has_content() {
            continue;
        }

        let navigation = resolve(ctx, node.name(), link)?;
        let target = navigation.target;

        if let Some(order) = link.orders().first().or_else(|| target.orders().first()) {
            return Err(UnsupportedError::OrderOnLinkEntity {
                alias: link.alias.clone().unwrap_or_else(|| link.name.clone()),
                attribute: order.attribute.clone(),
            }
            .into());
        }

        let mut expand = ODataLinkClause::new(navigation.property);
        expand.select = compile_select(ctx, target)?;

        if link.link_type == LinkType::Outer || navigation.collection {
            expand.filter = compile_filters(ctx, target.name(), target.filters(), "")?;
        }

        expand.expand = compile_joins(ctx, target)?;
        expands.push(expand);
    }

    Ok(expands)
}

/// Builds the top-level filters that make inner link-entities behave as
/// inner joins.
///
/// A single-valued link requires its own filters to hold, or the related
/// record to exist. A collection link requires at least one related record
/// matching its filters, through `any` with an `o<N>` variable. `path` is
/// the navigation prefix of the links of `node`.
pub(crate) fn compile_inner_join_filters<E: EntityNode + ?Sized>(
    ctx: &mut Compilation<'_>,
    node: &E,
    path: &str,
) -> Result<Vec<ODataFilterClause>, ConvertError> {
    let mut filters = Vec::new();

    for link in node.links().iter().filter(|l| l.link_type == LinkType::Inner) {
        let navigation = resolve(ctx, node.name(), link)?;
        let target = navigation.target;
        let primary_key = ctx.entity(target.name())?.primary_id_attribute().to_string();
        let property = format!("{}{}", path, navigation.property);

        if navigation.collection {
            let variable = ctx.next_join_variable();
            let nav = format!("{}/", variable);
            log::trace!("inner join on {} through {}", property, variable);

            let mut clauses = compile_filters(ctx, target.name(), target.filters(), &nav)?;
            if join_filters(&clauses).is_none() {
                clauses = vec![ODataFilterClause::single(format!("{}{} ne null", nav, primary_key))];
            }
            clauses.extend(compile_inner_join_filters(ctx, target, &nav)?);

            let body = join_filters(&clauses).unwrap_or_default();
            filters.push(ODataFilterClause::single(format!("{}/any({}:{})", property, variable, body)));
        } else {
            let nav = format!("{}/", property);
            log::trace!("inner join on {}", property);

            let clauses = compile_filters(ctx, target.name(), target.filters(), &nav)?;
            if join_filters(&clauses).is_some() {
                filters.extend(clauses);
            } else if !path.is_empty() {
                return Err(UnsupportedError::NestedInnerJoin { navigation: property }.into());
            } else {
                filters.push(ODataFilterClause::single(format!("{}/{} ne null", property, primary_key)));
            }

            filters.extend(compile_inner_join_filters(ctx, target, &nav)?);
        }
    }

    Ok(filters)
}
