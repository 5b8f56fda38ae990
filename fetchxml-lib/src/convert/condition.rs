//! Single condition compilation.

use super::context::Compilation;
use super::operator::Arity;
use super::operator::OperatorKind;
use super::operator::classify;
use super::relationship::resolve;
use crate::error::ConvertError;
use crate::error::InputError;
use crate::error::UnsupportedError;
use crate::model::metadata::AttributeMetadata;
use crate::model::metadata::AttributeType;
use crate::query::fetchxml::Condition;
use crate::query::fetchxml::EntityNode;
use crate::query::odata::ValueType;
use crate::query::odata::encode;
use crate::query::odata::escape_string;
use crate::query::odata::format_value;

const CRM_NAMESPACE: &str = "Microsoft.Dynamics.CRM";

/// Compiles a condition on an attribute of `entity`.
///
/// `nav` is the navigation path prefix the attribute is reached through, such
/// as `""`, `"primarycontactid/"` or `"x1/"`. A condition with `entityname`
/// set ignores both and is resolved against the link-entities of the root.
pub(crate) fn compile_condition(
    ctx: &mut Compilation<'_>,
    entity: &str,
    condition: &Condition,
    nav: &str,
) -> Result<String, ConvertError> {
    let mut entity = entity.to_string();
    let mut nav = nav.to_string();

    if let Some(entity_name) = &condition.entity_name {
        let root = ctx.root();
        let found = find_link(ctx, root, entity_name, "", false)?;
        let Some((path, collection, name)) = found else {
            return Err(InputError::UnknownEntityName {
                entity_name: entity_name.clone(),
            }
            .into());
        };
        if collection {
            return Err(UnsupportedError::ChildCollectionFilter { navigation: path }.into());
        }
        entity = name;
        nav = path;
    }

    if nav.split('/').count() >= 3 {
        return Err(UnsupportedError::NestedFilter { navigation: nav }.into());
    }

    let metadata = ctx.entity(&entity)?;
    let attribute = metadata
        .attribute(&condition.attribute)
        .ok_or_else(|| InputError::unknown_attribute(&entity, &condition.attribute))?;

    let mut property = format!("{}{}", nav, attribute.property_name());
    if attribute.is_managed_property() {
        property.push_str("/Value");
    }
    let function_path = encode(&format!("{}{}", nav, attribute.logical_name));

    let missing_value = || InputError::MissingValue {
        attribute: condition.attribute.clone(),
        operator: condition.operator.to_string(),
    };

    match classify(condition.operator) {
        OperatorKind::Compare(op) => {
            let value = match (condition.literal(), &condition.value_of) {
                (Some(literal), _) => format_literal(ctx, attribute, literal)?,
                (None, Some(column)) => column.clone(),
                (None, None) => return Err(missing_value().into()),
            };
            Ok(format!("{} {} {}", property, op, value))
        }
        OperatorKind::Null(test) => Ok(format!("{} {}", property, test)),
        OperatorKind::Like { negated } => {
            let value = condition.literal().ok_or_else(missing_value)?;
            let pattern = parse_like(value)?;

            let function = match (pattern.prefix, pattern.suffix) {
                (false, false) => {
                    let op = if negated { "ne" } else { "eq" };
                    let literal = format_literal(ctx, attribute, &pattern.text)?;
                    return Ok(format!("{} {} {}", property, op, literal));
                }
                (true, true) => "contains",
                (true, false) => "endswith",
                (false, true) => "startswith",
            };
            Ok(string_function(function, negated, &function_path, &pattern.text))
        }
        OperatorKind::StringFunction { function, negated } => {
            let value = condition.literal().ok_or_else(missing_value)?;
            Ok(string_function(function, negated, &function_path, value))
        }
        OperatorKind::Function { name, arity, parameter } => {
            let mut rendered = format!(
                "{}{}.{}(PropertyName='{}'",
                nav,
                CRM_NAMESPACE,
                name,
                encode(&attribute.logical_name)
            );

            match arity {
                Arity::None => {}
                Arity::Single => {
                    let value = condition.literal().ok_or_else(missing_value)?;
                    rendered.push_str(&format!(",PropertyValue={}", format_value(parameter, value)?));
                }
                Arity::Pair => {
                    let [first, second] = condition.values.as_slice() else {
                        return Err(InputError::ValueCount {
                            attribute: condition.attribute.clone(),
                            operator: condition.operator.to_string(),
                            expected: 2,
                            found: condition.values.len(),
                        }
                        .into());
                    };
                    rendered.push_str(&format!(
                        ",Property1={},Property2={}",
                        format_value(parameter, first)?,
                        format_value(parameter, second)?
                    ));
                }
                Arity::Many => {
                    let values: Vec<&str> = if condition.values.is_empty() {
                        vec![condition.literal().ok_or_else(missing_value)?]
                    } else {
                        condition.values.iter().map(String::as_str).collect()
                    };
                    let values = values
                        .into_iter()
                        .map(|v| format_value(parameter, v))
                        .collect::<Result<Vec<_>, _>>()?;
                    rendered.push_str(&format!(",PropertyValues=[{}]", values.join(",")));
                }
            }

            rendered.push(')');
            Ok(rendered)
        }
    }
}

fn string_function(function: &str, negated: bool, path: &str, value: &str) -> String {
    let not = if negated { "not " } else { "" };
    format!("{}{}({}, {})", not, function, path, escape_string(value))
}

/// Formats a literal for comparison with `attribute`.
///
/// Entity name attributes accept an object type code in place of the name.
fn format_literal(
    ctx: &Compilation<'_>,
    attribute: &AttributeMetadata,
    value: &str,
) -> Result<String, ConvertError> {
    let value_type = attribute.value_type();

    if value_type == AttributeType::EntityName {
        if let Ok(code) = value.trim().parse::<i32>() {
            let entity = ctx.entity_by_type_code(code)?;
            return Ok(escape_string(entity.logical_name()));
        }
    }

    Ok(format_value(ValueType::for_attribute(value_type), value)?)
}

/// Searches the link-entities below `node` for the one `entity_name`
/// refers to.
///
/// Returns the navigation path to it, whether any hop on the way is a
/// collection, and its entity name.
fn find_link<E: EntityNode + ?Sized>(
    ctx: &mut Compilation<'_>,
    node: &E,
    entity_name: &str,
    path: &str,
    collection: bool,
) -> Result<Option<(String, bool, String)>, ConvertError> {
    for link in node.links() {
        let navigation = resolve(ctx, node.name(), link)?;
        let path = format!("{}{}/", path, navigation.property);
        let collection = collection || navigation.collection;

        if navigation.target.is_referenced_by(entity_name) || link.is_referenced_by(entity_name) {
            return Ok(Some((path, collection, navigation.target.name().to_string())));
        }

        let found = find_link(ctx, navigation.target, entity_name, &path, collection)?;
        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}

/// A `like` value with its outer wildcards removed and escapes resolved.
#[derive(Debug, PartialEq)]
struct LikePattern {
    text: String,
    prefix: bool,
    suffix: bool,
}

/// Parses a `like` value.
///
/// Only a `%` at either end is a wildcard. Inside the value, `[%]`, `[_]` and
/// `[[]` stand for the literal character and any other metacharacter is
/// rejected.
fn parse_like(value: &str) -> Result<LikePattern, UnsupportedError> {
    let complex = || UnsupportedError::ComplexWildcard {
        value: value.to_string(),
    };

    let (prefix, rest) = match value.strip_prefix('%') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let (suffix, rest) = match rest.strip_suffix('%') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };

    let mut text = String::with_capacity(rest.len());
    let mut chars = rest.chars();
    while let Some(c) = chars.next() {
        match c {
            '[' => match (chars.next(), chars.next()) {
                (Some(escaped @ ('%' | '_' | '[')), Some(']')) => text.push(escaped),
                _ => return Err(complex()),
            },
            '%' | '_' | ']' => return Err(complex()),
            other => text.push(other),
        }
    }

    Ok(LikePattern { text, prefix, suffix })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::InMemoryMetadata;
    use crate::model::metadata::EntityMetadata;
    use crate::query::fetchxml::ConditionOperator;
    use crate::query::fetchxml::Entity;

    fn metadata() -> InMemoryMetadata {
        InMemoryMetadata::new()
            .with_entity(
                EntityMetadata::new("account", "accounts", "accountid")
                    .with_attribute(AttributeMetadata::new("name", AttributeType::String))
                    .with_attribute(AttributeMetadata::new("numberofemployees", AttributeType::Integer))
                    .with_attribute(AttributeMetadata::new("createdon", AttributeType::DateTime))
                    .with_attribute(AttributeMetadata::lookup("parentaccountid", ["account"])),
            )
            .with_entity(
                EntityMetadata::new("incident", "incidents", "incidentid").with_object_type_code(112),
            )
            .with_entity(
                EntityMetadata::new("stringmap", "stringmaps", "stringmapid")
                    .with_attribute(AttributeMetadata::new("objecttypecode", AttributeType::EntityName)),
            )
    }

    fn compile(entity: &str, condition: Condition) -> Result<String, ConvertError> {
        let metadata = metadata();
        let root = Entity::new(entity);
        let mut ctx = Compilation::new(&metadata, &root);
        compile_condition(&mut ctx, entity, &condition, "")
    }

    #[test]
    fn test_parse_like() {
        let pattern = parse_like("%FXB%").unwrap();
        assert_eq!(pattern.text, "FXB");
        assert!(pattern.prefix && pattern.suffix);

        assert_eq!(parse_like("[[]FXB%").unwrap().text, "[FXB");
        assert_eq!(parse_like("50[%] off").unwrap().text, "50% off");
        assert_eq!(parse_like("a[_]b").unwrap().text, "a_b");

        assert!(parse_like("%F_XB%").is_err());
        assert!(parse_like("F%XB").is_err());
        assert!(parse_like("[FXB").is_err());
        assert!(parse_like("FXB]").is_err());
        assert!(parse_like("[ab]").is_err());
    }

    #[test]
    fn test_like_forms() {
        let like = |v: &str| Condition::new("name", ConditionOperator::Like).value(v);

        assert_eq!(compile("account", like("FXB%")).unwrap(), "startswith(name, 'FXB')");
        assert_eq!(compile("account", like("%FXB")).unwrap(), "endswith(name, 'FXB')");
        assert_eq!(compile("account", like("%FXB%")).unwrap(), "contains(name, 'FXB')");
        assert_eq!(compile("account", like("FXB")).unwrap(), "name eq 'FXB'");
        assert_eq!(
            compile("account", Condition::new("name", ConditionOperator::NotLike).value("%FXB%")).unwrap(),
            "not contains(name, 'FXB')"
        );
    }

    #[test]
    fn test_compare_and_null() {
        let condition = Condition::new("numberofemployees", ConditionOperator::Ge).value("10");
        assert_eq!(compile("account", condition).unwrap(), "numberofemployees ge 10");

        let condition = Condition::new("name", ConditionOperator::NotNull);
        assert_eq!(compile("account", condition).unwrap(), "name ne null");

        let condition = Condition::new("name", ConditionOperator::Eq).value_of("description");
        assert_eq!(compile("account", condition).unwrap(), "name eq description");
    }

    #[test]
    fn test_lookup_uses_value_property() {
        let condition = Condition::new("parentaccountid", ConditionOperator::Eq)
            .value("{3FEE3D59-68C9-ED11-B597-0022489B41C4}");
        assert_eq!(
            compile("account", condition).unwrap(),
            "_parentaccountid_value eq 3fee3d59-68c9-ed11-b597-0022489b41c4"
        );
    }

    #[test]
    fn test_entity_name_type_code() {
        let condition = Condition::new("objecttypecode", ConditionOperator::Eq).value("112");
        assert_eq!(compile("stringmap", condition).unwrap(), "objecttypecode eq 'incident'");

        let condition = Condition::new("objecttypecode", ConditionOperator::Eq).value("999");
        assert!(compile("stringmap", condition).unwrap_err().is_not_found());
    }

    #[test]
    fn test_functions() {
        let condition = Condition::new("createdon", ConditionOperator::Today);
        assert_eq!(
            compile("account", condition).unwrap(),
            "Microsoft.Dynamics.CRM.Today(PropertyName='createdon')"
        );

        let condition = Condition::new("createdon", ConditionOperator::LastXDays).value("7");
        assert_eq!(
            compile("account", condition).unwrap(),
            "Microsoft.Dynamics.CRM.LastXDays(PropertyName='createdon',PropertyValue=7)"
        );

        let condition =
            Condition::new("createdon", ConditionOperator::InFiscalPeriodAndYear).values(["3", "2023"]);
        assert_eq!(
            compile("account", condition).unwrap(),
            "Microsoft.Dynamics.CRM.InFiscalPeriodAndYear(PropertyName='createdon',Property1=3,Property2=2023)"
        );

        let condition = Condition::new("name", ConditionOperator::In).values(["a", "b"]);
        assert_eq!(
            compile("account", condition).unwrap(),
            "Microsoft.Dynamics.CRM.In(PropertyName='name',PropertyValues=['a','b'])"
        );
    }

    #[test]
    fn test_empty_values() {
        let condition = Condition::new("name", ConditionOperator::Eq).value("");
        assert_eq!(compile("account", condition).unwrap(), "name eq ''");

        let condition = Condition::new("name", ConditionOperator::NotLike).value("");
        assert_eq!(compile("account", condition).unwrap(), "name ne ''");

        let condition = Condition::new("numberofemployees", ConditionOperator::Eq).value("");
        assert!(compile("account", condition).unwrap_err().is_input());
    }

    #[test]
    fn test_missing_values() {
        let err = compile("account", Condition::new("name", ConditionOperator::Eq)).unwrap_err();
        assert!(err.is_input());

        let condition = Condition::new("createdon", ConditionOperator::InFiscalPeriodAndYear).values(["3"]);
        assert_eq!(
            compile("account", condition).unwrap_err(),
            ConvertError::from(InputError::ValueCount {
                attribute: "createdon".to_string(),
                operator: "in-fiscal-period-and-year".to_string(),
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn test_unknown_attribute() {
        let err = compile("account", Condition::new("nope", ConditionOperator::Null)).unwrap_err();
        assert_eq!(err.to_string(), "No metadata for attribute: account.nope");
    }

    #[test]
    fn test_unknown_entity_name() {
        let condition = Condition::new("name", ConditionOperator::Null).entity_name("missing");
        assert_eq!(
            compile("account", condition).unwrap_err().to_string(),
            "Cannot find filter entity missing"
        );
    }
}
