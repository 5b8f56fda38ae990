//! End-to-end conversion tests against a small schema.

mod common;

use std::sync::Arc;

use common::converter;
use common::metadata;
use common::url;
use fetchxml_lib::ConvertError;
use fetchxml_lib::FetchXmlConverter;
use fetchxml_lib::error::InputError;
use fetchxml_lib::error::UnsupportedError;
use fetchxml_lib::metadata::CachedMetadata;
use fetchxml_lib::query::fetchxml::AggregateType;
use fetchxml_lib::query::fetchxml::Attribute;
use fetchxml_lib::query::fetchxml::Condition;
use fetchxml_lib::query::fetchxml::ConditionOperator;
use fetchxml_lib::query::fetchxml::Entity;
use fetchxml_lib::query::fetchxml::Fetch;
use fetchxml_lib::query::fetchxml::Filter;
use fetchxml_lib::query::fetchxml::LinkEntity;
use fetchxml_lib::query::fetchxml::LinkType;
use fetchxml_lib::query::fetchxml::Order;
use pretty_assertions::assert_eq;

fn convert(fetch: Fetch) -> Result<String, ConvertError> {
    converter().convert_to_url(&fetch)
}

fn account() -> Entity {
    Entity::new("account").attribute("name")
}

fn eq(attribute: &str, value: &str) -> Condition {
    Condition::new(attribute, ConditionOperator::Eq).value(value)
}

/// account -> contact through `primarycontactid`.
fn primary_contact() -> LinkEntity {
    LinkEntity::new("contact", "contactid", "primarycontactid").attribute("firstname")
}

/// account -> contacts through `parentcustomerid`.
fn customer_contacts() -> LinkEntity {
    LinkEntity::new("contact", "parentcustomerid", "accountid").attribute("firstname")
}

// =============================================================================
// Select, order, top
// =============================================================================

#[test]
fn test_simple() {
    assert_eq!(convert(Fetch::new(account())).unwrap(), url("accounts?$select=name"));
}

#[test]
fn test_no_children() {
    assert_eq!(convert(Fetch::new(Entity::new("account"))).unwrap(), url("accounts"));
}

#[test]
fn test_all_attributes() {
    let entity = Entity::new("account").all_attributes().order(Order::desc("name"));
    assert_eq!(convert(Fetch::new(entity)).unwrap(), url("accounts?$orderby=name desc"));
}

#[test]
fn test_order() {
    let entity = account().order(Order::asc("name"));
    assert_eq!(convert(Fetch::new(entity)).unwrap(), url("accounts?$select=name&$orderby=name asc"));
}

#[test]
fn test_top() {
    assert_eq!(convert(Fetch::new(account()).top(10)).unwrap(), url("accounts?$select=name&$top=10"));
}

#[test]
fn test_live_datasource_and_first_page() {
    let fetch = Fetch::new(account()).datasource("live").page(1);
    assert_eq!(convert(fetch).unwrap(), url("accounts?$select=name"));
}

#[test]
fn test_page_size_needs_prefer_header() {
    let query = converter().convert(&Fetch::new(account()).count(25)).unwrap();
    assert_eq!(query.url, url("accounts?$select=name"));
    assert_eq!(query.prefer_headers, vec!["odata.maxpagesize=25".to_string()]);
}

// =============================================================================
// Expand
// =============================================================================

#[test]
fn test_outer_join_to_parent() {
    let entity = account().link(primary_contact().link_type(LinkType::Outer));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$expand=primarycontactid($select=firstname)")
    );
}

#[test]
fn test_outer_join_to_children() {
    let entity = account().link(customer_contacts().link_type(LinkType::Outer));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$expand=contact_customer_accounts($select=firstname)")
    );
}

#[test]
fn test_outer_join_with_filter_is_inline() {
    let link = primary_contact()
        .link_type(LinkType::Outer)
        .filter(Filter::and().condition(eq("firstname", "Mark")));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url("accounts?$select=name&$expand=primarycontactid($select=firstname;$filter=(firstname eq 'Mark'))")
    );
}

#[test]
fn test_many_to_many() {
    let link = LinkEntity::new("accountleads", "accountid", "accountid")
        .link_type(LinkType::Outer)
        .link(LinkEntity::new("lead", "leadid", "leadid").attribute("subject"));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url("accounts?$select=name&$expand=accountleads_association($select=subject)")
    );
}

#[test]
fn test_link_without_content_is_not_expanded() {
    let link = LinkEntity::new("contact", "contactid", "primarycontactid").link_type(LinkType::Outer);
    assert_eq!(convert(Fetch::new(account().link(link))).unwrap(), url("accounts?$select=name"));
}

// =============================================================================
// Filter
// =============================================================================

#[test]
fn test_filter() {
    let entity = account().filter(Filter::and().condition(eq("name", "FXB")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(name eq 'FXB')")
    );
}

#[test]
fn test_filter_on_empty_string() {
    let entity = account().filter(Filter::and().condition(eq("name", "")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(name eq '')")
    );
}

#[test]
fn test_nested_filter() {
    let entity = account().filter(
        Filter::and().condition(eq("name", "FXB")).filter(
            Filter::or()
                .condition(eq("websiteurl", "xrmtoolbox.com"))
                .condition(eq("websiteurl", "fetchxmlbuilder.com")),
        ),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url(
            "accounts?$select=name&$filter=(name eq 'FXB' and (websiteurl eq 'xrmtoolbox.com' or websiteurl eq 'fetchxmlbuilder.com'))"
        )
    );
}

#[test]
fn test_empty_filter() {
    let entity = account().filter(Filter::and()).filter(Filter::or().filter(Filter::and()));
    assert_eq!(convert(Fetch::new(entity)).unwrap(), url("accounts?$select=name"));
}

#[test]
fn test_prefix() {
    let entity = account().filter(
        Filter::and().condition(Condition::new("name", ConditionOperator::Like).value("FXB%")),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(startswith(name, 'FXB'))")
    );
}

#[test]
fn test_escaped_wildcard() {
    let entity = account().filter(
        Filter::and().condition(Condition::new("name", ConditionOperator::Like).value("[[]FXB%")),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(startswith(name, '%5bFXB'))")
    );
}

#[test]
fn test_complex_wildcard() {
    let entity = account().filter(
        Filter::and().condition(Condition::new("name", ConditionOperator::Like).value("%F_XB%")),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap_err(),
        ConvertError::from(UnsupportedError::ComplexWildcard {
            value: "%F_XB%".to_string()
        })
    );
}

#[test]
fn test_lookup_filter() {
    let entity = account().filter(Filter::and().condition(eq(
        "primarycontactid",
        "3FEE3D59-68C9-ED11-B597-0022489B41C4",
    )));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(_primarycontactid_value eq 3fee3d59-68c9-ed11-b597-0022489b41c4)")
    );
}

#[test]
fn test_date_function() {
    let entity = account().filter(
        Filter::and()
            .condition(Condition::new("createdon", ConditionOperator::LastXDays).value("7"))
            .condition(Condition::new("createdon", ConditionOperator::ThisYear)),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url(
            "accounts?$select=name&$filter=(Microsoft.Dynamics.CRM.LastXDays(PropertyName='createdon',PropertyValue=7) and Microsoft.Dynamics.CRM.ThisYear(PropertyName='createdon'))"
        )
    );
}

#[test]
fn test_timestamp_literal() {
    let entity = account().filter(
        Filter::and().condition(Condition::new("createdon", ConditionOperator::Gt).value("2020-01-01T10:30:00Z")),
    );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(createdon gt 2020-01-01T10:30:00Z)")
    );
}

#[test]
fn test_entity_name_from_type_code() {
    let entity = Entity::new("stringmap")
        .attribute("attributevalue")
        .attribute("attributename")
        .attribute("value")
        .filter(
            Filter::and()
                .condition(eq("attributename", "prioritycode"))
                .condition(eq("objecttypecode", "112")),
        );
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url(
            "stringmaps?$select=attributevalue,attributename,value&$filter=(attributename eq 'prioritycode' and objecttypecode eq 'incident')"
        )
    );
}

#[test]
fn test_picklist_is_numeric() {
    let entity = Entity::new("connection")
        .attribute("connectionid")
        .filter(Filter::and().condition(eq("record1objecttypecode", "8")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("connections?$select=connectionid&$filter=(record1objecttypecode eq 8)")
    );
}

#[test]
fn test_managed_property() {
    let entity = Entity::new("webresource")
        .attribute("name")
        .attribute("iscustomizable")
        .filter(Filter::and().condition(eq("iscustomizable", "1")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("webresourceset?$select=name,iscustomizable&$filter=(iscustomizable/Value eq true)")
    );
}

#[test]
fn test_filter_on_aliased_parent() {
    let link = primary_contact().link_type(LinkType::Outer).alias("pc");
    let entity = account()
        .link(link)
        .filter(Filter::and().condition(eq("firstname", "Mark").entity_name("pc")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$expand=primarycontactid($select=firstname)&$filter=(primarycontactid/firstname eq 'Mark')")
    );
}

#[test]
fn test_filter_on_aliased_children_fails() {
    let link = customer_contacts().link_type(LinkType::Outer).alias("c");
    let entity = account()
        .link(link)
        .filter(Filter::and().condition(eq("firstname", "Mark").entity_name("c")));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap_err(),
        ConvertError::from(UnsupportedError::ChildCollectionFilter {
            navigation: "contact_customer_accounts/".to_string()
        })
    );
}

// =============================================================================
// Inner joins
// =============================================================================

#[test]
fn test_inner_join_to_parent() {
    let entity = account().link(primary_contact());
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$expand=primarycontactid($select=firstname)&$filter=(primarycontactid/contactid ne null)")
    );
}

#[test]
fn test_inner_join_to_parent_with_filter() {
    let link = primary_contact().filter(Filter::and().condition(eq("firstname", "Mark")));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url("accounts?$select=name&$expand=primarycontactid($select=firstname)&$filter=(primarycontactid/firstname eq 'Mark')")
    );
}

#[test]
fn test_inner_join_to_parent_with_function() {
    let link = primary_contact()
        .filter(Filter::and().condition(Condition::new("createdon", ConditionOperator::On).value("2020-01-01")));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url(
            "accounts?$select=name&$expand=primarycontactid($select=firstname)&$filter=(primarycontactid/Microsoft.Dynamics.CRM.On(PropertyName='createdon',PropertyValue='2020-01-01'))"
        )
    );
}

#[test]
fn test_inner_join_to_children() {
    let entity = account().link(customer_contacts());
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url(
            "accounts?$select=name&$expand=contact_customer_accounts($select=firstname)&$filter=(contact_customer_accounts/any(o1:(o1/contactid ne null)))"
        )
    );
}

#[test]
fn test_inner_join_to_children_with_filter() {
    let link = customer_contacts().filter(Filter::and().condition(eq("firstname", "Mark")));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url(
            "accounts?$select=name&$expand=contact_customer_accounts($select=firstname;$filter=(firstname eq 'Mark'))&$filter=(contact_customer_accounts/any(o1:(o1/firstname eq 'Mark')))"
        )
    );
}

#[test]
fn test_inner_join_to_children_with_prefix() {
    let link = customer_contacts()
        .filter(Filter::and().condition(Condition::new("firstname", ConditionOperator::Like).value("FXB%")));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url(
            "accounts?$select=name&$expand=contact_customer_accounts($select=firstname;$filter=(startswith(firstname, 'FXB')))&$filter=(contact_customer_accounts/any(o1:(startswith(o1%2ffirstname, 'FXB'))))"
        )
    );
}

#[test]
fn test_inner_join_variables_are_numbered() {
    let entity = account()
        .link(customer_contacts())
        .link(customer_contacts().filter(Filter::and().condition(eq("firstname", "Mark"))));
    let converted = convert(Fetch::new(entity)).unwrap();
    assert!(converted.ends_with(
        "$filter=(contact_customer_accounts/any(o1:(o1/contactid ne null))) and (contact_customer_accounts/any(o2:(o2/firstname eq 'Mark')))"
    ));
}

#[test]
fn test_links_below_outer_join_are_not_filtered() {
    let link = customer_contacts()
        .link_type(LinkType::Outer)
        .link(LinkEntity::new("account", "primarycontactid", "contactid").attribute("name"));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap(),
        url("accounts?$select=name&$expand=contact_customer_accounts($select=firstname;$expand=account_primarycontact($select=name))")
    );
}

#[test]
fn test_nested_inner_join_fails() {
    let link = primary_contact().link(LinkEntity::new("account", "accountid", "parentcustomerid").attribute("name"));
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap_err(),
        ConvertError::from(UnsupportedError::NestedInnerJoin {
            navigation: "primarycontactid/parentcustomerid".to_string()
        })
    );
}

// =============================================================================
// any / all
// =============================================================================

fn lambda(link_type: LinkType) -> Entity {
    let link = LinkEntity::new("contact", "parentcustomerid", "accountid")
        .link_type(link_type)
        .filter(Filter::and().condition(eq("firstname", "Mark")));
    account().filter(Filter::and().link(link))
}

#[test]
fn test_any() {
    assert_eq!(
        convert(Fetch::new(lambda(LinkType::Any))).unwrap(),
        url("accounts?$select=name&$filter=(contact_customer_accounts/any(x1:(x1/firstname eq 'Mark')))")
    );
}

#[test]
fn test_all() {
    assert_eq!(
        convert(Fetch::new(lambda(LinkType::All))).unwrap(),
        url("accounts?$select=name&$filter=(contact_customer_accounts/all(x1:(x1/firstname eq 'Mark')))")
    );
}

#[test]
fn test_not_any() {
    assert_eq!(
        convert(Fetch::new(lambda(LinkType::NotAny))).unwrap(),
        url("accounts?$select=name&$filter=(not contact_customer_accounts/any(x1:(x1/firstname ne 'Mark')))")
    );
}

#[test]
fn test_not_all() {
    assert_eq!(
        convert(Fetch::new(lambda(LinkType::NotAll))).unwrap(),
        url("accounts?$select=name&$filter=(not contact_customer_accounts/all(x1:(x1/firstname ne 'Mark')))")
    );
}

#[test]
fn test_any_without_filter() {
    let link = LinkEntity::new("contact", "parentcustomerid", "accountid").link_type(LinkType::Any);
    let entity = account().filter(Filter::and().link(link));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url("accounts?$select=name&$filter=(contact_customer_accounts/any())")
    );
}

#[test]
fn test_nested_not_all() {
    let inner = LinkEntity::new("account", "primarycontactid", "contactid")
        .link_type(LinkType::NotAny)
        .filter(Filter::and().condition(eq("name", "Data8")));
    let outer = LinkEntity::new("contact", "parentcustomerid", "accountid")
        .link_type(LinkType::NotAll)
        .filter(Filter::and().link(inner));
    let entity = account().filter(Filter::and().link(outer));

    assert_eq!(
        convert(Fetch::new(entity)).unwrap(),
        url(
            "accounts?$select=name&$filter=(not contact_customer_accounts/all(x1:(x1/account_primarycontact/any(x2:(x2/name eq 'Data8')))))"
        )
    );
}

#[test]
fn test_not_any_with_non_invertible_operator() {
    let link = LinkEntity::new("contact", "parentcustomerid", "accountid")
        .link_type(LinkType::NotAny)
        .filter(Filter::and().condition(Condition::new("createdon", ConditionOperator::Today)));
    let entity = account().filter(Filter::and().link(link));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap_err(),
        ConvertError::from(UnsupportedError::NonInvertibleOperator {
            operator: "today".to_string()
        })
    );
}

#[test]
fn test_outer_link_in_filter_fails() {
    let link = customer_contacts().link_type(LinkType::Outer);
    let entity = account().filter(Filter::and().link(link));
    assert!(matches!(
        convert(Fetch::new(entity)).unwrap_err(),
        ConvertError::Unsupported(UnsupportedError::LinkTypeInFilter { .. })
    ));
}

// =============================================================================
// Aggregates
// =============================================================================

#[test]
fn test_group_by_with_count() {
    let entity = Entity::new("account")
        .attribute(Attribute::new("name").group_by())
        .attribute(Attribute::new("accountid").aggregate(AggregateType::Count).alias("count"));
    assert_eq!(
        convert(Fetch::new(entity).aggregate()).unwrap(),
        url("accounts?$apply=groupby((name),aggregate($count as count))")
    );
}

#[test]
fn test_aggregate_without_groups() {
    let entity = Entity::new("account")
        .attribute(Attribute::new("websiteurl").aggregate(AggregateType::Max).alias("maxwebsite"));
    assert_eq!(
        convert(Fetch::new(entity).aggregate()).unwrap(),
        url("accounts?$apply=aggregate(websiteurl with max as maxwebsite)")
    );
}

#[test]
fn test_aggregate_with_filter() {
    let entity = Entity::new("account")
        .attribute(Attribute::new("name").group_by())
        .attribute(Attribute::new("accountid").aggregate(AggregateType::CountColumn))
        .filter(Filter::and().condition(Condition::new("websiteurl", ConditionOperator::NotNull)));
    assert_eq!(
        convert(Fetch::new(entity).aggregate()).unwrap(),
        url("accounts?$apply=filter((websiteurl ne null))/groupby((name),aggregate(accountid with countdistinct as accountid))")
    );
}

#[test]
fn test_aggregate_ignores_top() {
    let entity = Entity::new("account")
        .attribute(Attribute::new("name").group_by())
        .attribute(Attribute::new("accountid").aggregate(AggregateType::Count).alias("count"));
    assert_eq!(
        convert(Fetch::new(entity).aggregate().top(10)).unwrap(),
        url("accounts?$apply=groupby((name),aggregate($count as count))")
    );
}

#[test]
fn test_aggregate_without_attributes_fails() {
    let entity = Entity::new("account").attribute("name");
    assert_eq!(
        convert(Fetch::new(entity).aggregate().top(10)).unwrap_err(),
        ConvertError::from(UnsupportedError::EmptyAggregate {
            entity: "account".to_string()
        })
    );
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_later_page_fails() {
    assert_eq!(
        convert(Fetch::new(account()).page(3)).unwrap_err(),
        ConvertError::from(UnsupportedError::Paging { page: 3 })
    );
}

#[test]
fn test_archive_datasource_fails() {
    assert_eq!(
        convert(Fetch::new(account()).datasource("archive")).unwrap_err(),
        ConvertError::from(UnsupportedError::DataSource {
            datasource: "archive".to_string()
        })
    );
}

#[test]
fn test_missing_entity_fails() {
    assert_eq!(convert(Fetch::default()).unwrap_err(), ConvertError::from(InputError::MissingEntity));
}

#[test]
fn test_unknown_entity_fails() {
    assert!(convert(Fetch::new(Entity::new("nope"))).unwrap_err().is_not_found());
}

#[test]
fn test_order_on_link_fails() {
    let entity = account().order(Order::asc("firstname").alias("pc"));
    assert_eq!(
        convert(Fetch::new(entity)).unwrap_err().to_string(),
        "OData queries do not support ordering on link entities. Please remove the sort on pc.firstname"
    );
}

#[test]
fn test_unresolved_relationship_fails() {
    let link = LinkEntity::new("lead", "leadid", "accountid").attribute("subject");
    assert_eq!(
        convert(Fetch::new(account().link(link))).unwrap_err(),
        ConvertError::from(UnsupportedError::Relationship {
            entity: "account".to_string(),
            to: "accountid".to_string(),
            link_entity: "lead".to_string(),
            from: "leadid".to_string(),
        })
    );
}

#[test]
fn test_structural_any_fails() {
    let entity = account().link(customer_contacts().link_type(LinkType::Any));
    assert!(matches!(
        convert(Fetch::new(entity)).unwrap_err(),
        ConvertError::Unsupported(UnsupportedError::LinkTypeInJoin { .. })
    ));
}

// =============================================================================
// Metadata sources
// =============================================================================

#[test]
fn test_cached_metadata_is_reused() {
    let cached = Arc::new(CachedMetadata::new(metadata()));
    let converter = FetchXmlConverter::builder()
        .org_url(common::ORG_URL)
        .metadata(Arc::clone(&cached))
        .build();

    let fetch = Fetch::new(account().link(primary_contact()));
    let first = converter.convert_to_url(&fetch).unwrap();
    let second = converter.convert_to_url(&fetch).unwrap();

    assert_eq!(first, second);
    assert_eq!(cached.len(), 2);
}

#[test]
fn test_converter_from_json_metadata() {
    let json = r#"{
        "value": [
            {
                "LogicalName": "account",
                "EntitySetName": "accounts",
                "PrimaryIdAttribute": "accountid",
                "Attributes": [
                    { "LogicalName": "name", "AttributeType": "String" }
                ]
            }
        ]
    }"#;
    let metadata = fetchxml_lib::metadata::InMemoryMetadata::from_json(json).unwrap();
    let converter = FetchXmlConverter::builder()
        .org_url(common::ORG_URL)
        .metadata(metadata)
        .build();

    assert_eq!(
        converter.convert_to_url(&Fetch::new(account())).unwrap(),
        url("accounts?$select=name")
    );
}
