//! Link-entity to navigation property resolution.

use super::context::Compilation;
use crate::error::ConvertError;
use crate::error::UnsupportedError;
use crate::query::fetchxml::LinkEntity;

/// A resolved link-entity.
#[derive(Debug)]
pub(crate) struct Navigation<'q> {
    /// Navigation property on the parent entity.
    pub property: String,
    /// `true` for collection-valued navigation.
    pub collection: bool,
    /// The link whose attributes, filters and nested links apply.
    ///
    /// For a many-to-many pair this is the second hop, not the intersect link.
    pub target: &'q LinkEntity,
}

/// Resolves `link`, joined from the entity `parent`, to a navigation property.
///
/// Tries one-to-many, then many-to-one, then many-to-many relationships of
/// the parent. A many-to-many join spans two link-entities: the intersect
/// entity and exactly one nested link to the far side.
pub(crate) fn resolve<'q>(
    ctx: &mut Compilation<'_>,
    parent: &str,
    link: &'q LinkEntity,
) -> Result<Navigation<'q>, ConvertError> {
    let entity = ctx.entity(parent)?;
    let unresolved = || UnsupportedError::Relationship {
        entity: parent.to_string(),
        to: link.to.clone(),
        link_entity: link.name.clone(),
        from: link.from.clone(),
    };

    let one_to_many = entity.one_to_many_relationships.iter().find(|r| {
        r.referenced_entity == parent
            && r.referenced_attribute.as_deref() == Some(link.to.as_str())
            && r.referencing_entity == link.name
            && r.referencing_attribute == link.from
    });
    if let Some(relationship) = one_to_many {
        let property = relationship
            .referenced_entity_navigation_property_name
            .clone()
            .ok_or_else(unresolved)?;
        log::trace!("{}.{} resolved to collection {}", parent, link.name, property);
        return Ok(Navigation {
            property,
            collection: true,
            target: link,
        });
    }

    let many_to_one = entity.many_to_one_relationships.iter().find(|r| {
        r.referencing_entity == parent
            && r.referencing_attribute == link.to
            && r.referenced_entity == link.name
            && r.referenced_attribute.as_deref() == Some(link.from.as_str())
    });
    if let Some(relationship) = many_to_one {
        let property = relationship
            .referencing_entity_navigation_property_name
            .clone()
            .ok_or_else(unresolved)?;
        log::trace!("{}.{} resolved to single-valued {}", parent, link.name, property);
        return Ok(Navigation {
            property,
            collection: false,
            target: link,
        });
    }

    let many_to_many = entity
        .many_to_many_relationships
        .iter()
        .filter(|r| r.intersect_entity_name == link.name);
    for relationship in many_to_many {
        for (near, far) in relationship.orientations() {
            if near.entity != parent || near.intersect_attribute != Some(link.from.as_str()) {
                continue;
            }

            let next = match link.links.as_slice() {
                [] => continue,
                [next] => next,
                _ => {
                    return Err(UnsupportedError::ManyToManyShape {
                        link_entity: link.name.clone(),
                    }
                    .into());
                }
            };

            if next.name == far.entity && far.intersect_attribute == Some(next.to.as_str()) {
                let property = near.navigation_property.ok_or_else(unresolved)?.to_string();
                log::trace!(
                    "{}.{} resolved to many-to-many {} via {}",
                    parent,
                    next.name,
                    property,
                    link.name
                );
                return Ok(Navigation {
                    property,
                    collection: true,
                    target: next,
                });
            }
        }
    }

    Err(unresolved().into())
}
