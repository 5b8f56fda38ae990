//! Shared schema fixture for conversion tests.

#![allow(dead_code)]

use fetchxml_lib::FetchXmlConverter;
use fetchxml_lib::metadata::InMemoryMetadata;
use fetchxml_lib::model::metadata::AttributeMetadata;
use fetchxml_lib::model::metadata::AttributeType;
use fetchxml_lib::model::metadata::EntityMetadata;
use fetchxml_lib::model::metadata::ManyToManyRelationship;
use fetchxml_lib::model::metadata::OneToManyRelationship;

pub const ORG_URL: &str = "https://example.crm.dynamics.com/api/data/v9.0";

/// Prefixes a query string with the org URL.
pub fn url(rest: &str) -> String {
    format!("{}/{}", ORG_URL, rest)
}

/// account, contact, lead, incident, connection, stringmap and webresource.
pub fn metadata() -> InMemoryMetadata {
    let customer_accounts = OneToManyRelationship::new(
        "contact_customer_accounts",
        "account",
        "accountid",
        "contact",
        "parentcustomerid",
    );
    let primary_contact = OneToManyRelationship::new(
        "account_primarycontact",
        "contact",
        "contactid",
        "account",
        "primarycontactid",
    );
    let account_leads = ManyToManyRelationship::new(
        "accountleads_association",
        "accountleads",
        ("account", "accountid"),
        ("lead", "leadid"),
    );

    InMemoryMetadata::new()
        .with_entity(
            EntityMetadata::new("account", "accounts", "accountid")
                .with_object_type_code(1)
                .with_attribute(AttributeMetadata::new("accountid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("name", AttributeType::String))
                .with_attribute(AttributeMetadata::new("websiteurl", AttributeType::String))
                .with_attribute(AttributeMetadata::new("createdon", AttributeType::DateTime))
                .with_attribute(AttributeMetadata::lookup("primarycontactid", ["contact"]))
                .with_one_to_many(customer_accounts.clone())
                .with_many_to_one(primary_contact.clone())
                .with_many_to_many(account_leads.clone()),
        )
        .with_entity(
            EntityMetadata::new("contact", "contacts", "contactid")
                .with_object_type_code(2)
                .with_attribute(AttributeMetadata::new("contactid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("firstname", AttributeType::String))
                .with_attribute(AttributeMetadata::new("createdon", AttributeType::DateTime))
                .with_attribute(AttributeMetadata {
                    targets: vec!["account".to_string(), "contact".to_string()],
                    ..AttributeMetadata::new("parentcustomerid", AttributeType::Customer)
                })
                .with_one_to_many(primary_contact)
                .with_many_to_one(customer_accounts),
        )
        .with_entity(
            EntityMetadata::new("lead", "leads", "leadid")
                .with_object_type_code(4)
                .with_attribute(AttributeMetadata::new("leadid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("subject", AttributeType::String))
                .with_many_to_many(account_leads),
        )
        .with_entity(
            EntityMetadata::new("incident", "incidents", "incidentid")
                .with_object_type_code(112)
                .with_attribute(AttributeMetadata::new("incidentid", AttributeType::Uniqueidentifier)),
        )
        .with_entity(
            EntityMetadata::new("connection", "connections", "connectionid")
                .with_attribute(AttributeMetadata::new("connectionid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("record1objecttypecode", AttributeType::Picklist)),
        )
        .with_entity(
            EntityMetadata::new("stringmap", "stringmaps", "stringmapid")
                .with_attribute(AttributeMetadata::new("stringmapid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("objecttypecode", AttributeType::EntityName))
                .with_attribute(AttributeMetadata::new("attributename", AttributeType::String))
                .with_attribute(AttributeMetadata::new("attributevalue", AttributeType::Integer))
                .with_attribute(AttributeMetadata::new("value", AttributeType::String)),
        )
        .with_entity(
            EntityMetadata::new("webresource", "webresourceset", "webresourceid")
                .with_attribute(AttributeMetadata::new("webresourceid", AttributeType::Uniqueidentifier))
                .with_attribute(AttributeMetadata::new("name", AttributeType::String))
                .with_attribute(AttributeMetadata::managed_property("iscustomizable", AttributeType::Boolean)),
        )
}

pub fn converter() -> FetchXmlConverter {
    FetchXmlConverter::builder()
        .org_url(ORG_URL)
        .metadata(metadata())
        .build()
}
