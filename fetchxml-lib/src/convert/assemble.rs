//! Root query assembly.

use super::context::Compilation;
use super::filter::compile_filters;
use super::join::compile_inner_join_filters;
use super::join::compile_joins;
use super::join::compile_select;
use crate::error::ConvertError;
use crate::error::InputError;
use crate::error::UnsupportedError;
use crate::metadata::MetadataProvider;
use crate::model::metadata::EntityMetadata;
use crate::query::fetchxml::AggregateType;
use crate::query::fetchxml::Entity;
use crate::query::fetchxml::EntityNode;
use crate::query::fetchxml::Fetch;
use crate::query::odata::ODataEntityClause;
use crate::query::odata::ODataOrderClause;

/// Compiles a fetch into the root query clause.
pub(crate) fn assemble(metadata: &dyn MetadataProvider, fetch: &Fetch) -> Result<ODataEntityClause, ConvertError> {
    if let Some(datasource) = &fetch.datasource {
        if !datasource.is_empty() && datasource != "live" {
            return Err(UnsupportedError::DataSource {
                datasource: datasource.clone(),
            }
            .into());
        }
    }

    if let Some(page) = fetch.page {
        if page != 1 {
            return Err(UnsupportedError::Paging { page }.into());
        }
    }

    let root = fetch.entity.as_ref().ok_or(InputError::MissingEntity)?;
    let mut ctx = Compilation::new(metadata, root);
    let entity = ctx.entity(&root.name)?;

    let mut query = ODataEntityClause::new(entity.collection_name()?);

    if fetch.aggregate {
        compile_aggregates(&entity, root, &mut query)?;
        if !query.is_aggregate() {
            return Err(UnsupportedError::EmptyAggregate {
                entity: root.name.clone(),
            }
            .into());
        }
    } else {
        query.link.select = compile_select(&mut ctx, root)?;
        query.order_by = compile_orders(&entity, root)?;
        query.top = fetch.top;
    }

    query.link.filter = compile_filters(&mut ctx, root.name(), root.filters(), "")?;
    query.link.expand = compile_joins(&mut ctx, root)?;

    let inner_joins = compile_inner_join_filters(&mut ctx, root, "")?;
    query.link.filter.extend(inner_joins);

    Ok(query)
}

fn compile_orders(entity: &EntityMetadata, root: &Entity) -> Result<Vec<ODataOrderClause>, ConvertError> {
    root.orders()
        .iter()
        .map(|order| {
            if let Some(alias) = &order.alias {
                return Err(UnsupportedError::OrderOnLinkEntity {
                    alias: alias.clone(),
                    attribute: order.attribute.clone(),
                }
                .into());
            }

            let attribute = entity
                .attribute(&order.attribute)
                .ok_or_else(|| InputError::unknown_attribute(&root.name, &order.attribute))?;
            Ok(ODataOrderClause {
                property_name: attribute.property_name(),
                descending: order.descending,
            })
        })
        .collect()
}

/// Fills in `groupby` and `aggregate` from the root attributes.
fn compile_aggregates(
    entity: &EntityMetadata,
    root: &Entity,
    query: &mut ODataEntityClause,
) -> Result<(), ConvertError> {
    for attribute in &root.attributes {
        let metadata = entity
            .attribute(&attribute.name)
            .ok_or_else(|| InputError::unknown_attribute(&root.name, &attribute.name))?;
        let property = metadata.property_name();

        if attribute.group_by {
            query.groups.push(property);
            continue;
        }

        let Some(aggregate) = attribute.aggregate else {
            continue;
        };
        let alias = attribute.alias.as_deref().unwrap_or(&attribute.name);

        let rendered = match aggregate {
            AggregateType::Count => format!("$count as {}", alias),
            AggregateType::CountColumn => format!("{} with countdistinct as {}", property, alias),
            AggregateType::Sum => format!("{} with sum as {}", property, alias),
            AggregateType::Avg => format!("{} with average as {}", property, alias),
            AggregateType::Min => format!("{} with min as {}", property, alias),
            AggregateType::Max => format!("{} with max as {}", property, alias),
        };
        query.aggregates.push(rendered);
    }

    Ok(())
}
