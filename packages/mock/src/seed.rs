//! Demo catalog content.
//!
//! A small sales/finance estate: one SQL server with three tables, an
//! invoice pipeline with lineage from a lake file through to Power BI, and
//! one definition of every type category. Nothing named `Glossary1` exists.

use datacatalog_api::{
    AttributeDef, EnumElementDef, RelationshipEndDef, TypeCategory, TypeDef,
};
use serde_json::{json, Value};

use crate::storage::{Storage, StorageError};

/// GUIDs of the seeded items, for callers that need to address them.
#[derive(Debug, Clone)]
pub struct Demo {
    pub sql_server: String,
    pub invoices: String,
    pub customers: String,
    pub orders: String,
    pub raw_invoices: String,
    pub load_invoices: String,
    pub invoice_summary: String,
    pub invoice_report: String,
    pub sensitivity_enum: String,
}

fn entity(type_name: &str, name: &str, qualified_name: &str, description: &str) -> Value {
    json!({
        "typeName": type_name,
        "attributes": {
            "name": name,
            "qualifiedName": qualified_name,
            "description": description,
        },
        "status": "ACTIVE",
    })
}

fn attr(name: &str, type_name: &str) -> AttributeDef {
    AttributeDef {
        name: name.into(),
        type_name: type_name.into(),
        cardinality: Some("SINGLE".into()),
        is_optional: Some(true),
        ..Default::default()
    }
}

fn typedefs() -> Vec<TypeDef> {
    let mut sensitivity = TypeDef::new(TypeCategory::Enum, "data_sensitivity");
    sensitivity.description = Some("How sensitive the data is".into());
    sensitivity.element_defs = Some(
        ["LOW", "MEDIUM", "HIGH"]
            .iter()
            .zip(0..)
            .map(|(v, i)| EnumElementDef {
                value: v.to_string(),
                ordinal: Some(i),
                ..Default::default()
            })
            .collect(),
    );

    let mut table = TypeDef::new(TypeCategory::Entity, "azure_sql_table");
    table.super_types = Some(vec!["DataSet".into()]);
    table.attribute_defs = Some(vec![attr("principalId", "int"), attr("objectType", "string")]);

    let mut invoice_number =
        TypeDef::new(TypeCategory::Classification, "MICROSOFT.FINANCIAL.INVOICE_NUMBER");
    invoice_number.description = Some("Invoice numbers".into());

    let mut address = TypeDef::new(TypeCategory::Struct, "address");
    address.attribute_defs = Some(vec![attr("street", "string"), attr("city", "string")]);

    let mut server_tables = TypeDef::new(TypeCategory::Relationship, "azure_sql_server_tables");
    server_tables.relationship_category = Some("COMPOSITION".into());
    server_tables.end_def1 = Some(RelationshipEndDef {
        type_name: "azure_sql_server".into(),
        name: "tables".into(),
        cardinality: Some("SET".into()),
        is_container: Some(true),
        ..Default::default()
    });
    server_tables.end_def2 = Some(RelationshipEndDef {
        type_name: "azure_sql_table".into(),
        name: "server".into(),
        cardinality: Some("SINGLE".into()),
        ..Default::default()
    });

    let mut steward = TypeDef::new(TypeCategory::TermTemplate, "Data Steward");
    steward.attribute_defs = Some(vec![attr("steward", "string")]);

    vec![sensitivity, table, invoice_number, address, server_tables, steward]
}

/// Load the demo content into `storage`.
pub async fn load_demo(storage: &dyn Storage) -> Result<Demo, StorageError> {
    let server_qn = "mssql://sales.database.windows.net";
    let sql_server = storage
        .put_entity(entity("azure_sql_server", "sales", server_qn, "Sales SQL server"))
        .await?;
    let invoices = storage
        .put_entity(entity(
            "azure_sql_table",
            "invoices",
            &format!("{server_qn}/invoices"),
            "Posted customer invoices",
        ))
        .await?;
    let customers = storage
        .put_entity(entity(
            "azure_sql_table",
            "customers",
            &format!("{server_qn}/customers"),
            "Customer master data",
        ))
        .await?;
    let orders = storage
        .put_entity(entity(
            "azure_sql_table",
            "orders",
            &format!("{server_qn}/orders"),
            "Open and closed sales orders",
        ))
        .await?;
    let raw_invoices = storage
        .put_entity(entity(
            "azure_datalake_gen2_path",
            "invoices.csv",
            "https://lake.dfs.core.windows.net/raw/invoices.csv",
            "Nightly invoice export",
        ))
        .await?;
    let load_invoices = storage
        .put_entity(entity(
            "azure_data_factory_pipeline",
            "load_invoices",
            "adf://sales-factory/pipelines/load_invoices",
            "Copies the invoice export into SQL",
        ))
        .await?;
    let invoice_summary = storage
        .put_entity(entity(
            "powerbi_dataset",
            "invoice_summary",
            "powerbi://finance/datasets/invoice_summary",
            "Invoice totals by month",
        ))
        .await?;
    let invoice_report = storage
        .put_entity(entity(
            "powerbi_report",
            "monthly_invoice_report",
            "powerbi://finance/reports/monthly_invoice_report",
            "Monthly invoice report",
        ))
        .await?;

    // lake file -> pipeline -> table -> {dataset, report}
    storage.add_lineage_edge(&raw_invoices, &load_invoices).await?;
    storage.add_lineage_edge(&load_invoices, &invoices).await?;
    storage.add_lineage_edge(&invoices, &invoice_summary).await?;
    storage.add_lineage_edge(&invoices, &invoice_report).await?;

    let mut sensitivity_enum = String::new();
    for def in typedefs() {
        let category = def.category.unwrap_or(TypeCategory::Entity);
        let value =
            serde_json::to_value(&def).map_err(|e| StorageError::Internal(e.to_string()))?;
        if let Some(stored) = storage.create_typedef(category, value).await? {
            if stored.name() == "data_sensitivity" {
                sensitivity_enum = stored.guid().to_string();
            }
        }
    }

    Ok(Demo {
        sql_server,
        invoices,
        customers,
        orders,
        raw_invoices,
        load_invoices,
        invoice_summary,
        invoice_report,
        sensitivity_enum,
    })
}
