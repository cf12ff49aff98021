//! Cable list tables.

use crate::field::{Field, FieldType};
use crate::table::{ForeignKey, ForeignKeyAction, TableSchema};

/// Table builders in creation order.
pub(super) const TABLES: [fn() -> TableSchema; 23] = [
    modification,
    vehicle_type,
    vehicle_type_unit,
    vehicle_type_link,
    connection_type,
    connector,
    connector_contact,
    article,
    article_component,
    article_connector,
    article_connection,
    article_link,
    unit,
    unit_connector,
    unit_connection,
    link_direction,
    link_type,
    link_version,
    wire,
    link_beam,
    link_beam_unit_start,
    link_beam_unit_end,
    link,
];

fn table(name: &str) -> TableSchema {
    TableSchema::new(name).with_encoding("UTF8")
}

fn integer(name: &str) -> Field {
    Field::new(name, FieldType::Integer)
}

fn double(name: &str) -> Field {
    Field::new(name, FieldType::Double)
}

fn varchar(name: &str, length: u32) -> Field {
    Field::varchar(name, length)
}

fn id_pk() -> Field {
    integer("Id_PK").auto_value()
}

/// Foreign key restricting parent deletes, cascading updates, with a child index.
fn foreign_key(parent: &str, pairs: &[(&str, &str)]) -> ForeignKey {
    pairs
        .iter()
        .fold(ForeignKey::new(parent), |fk, (parent_field, child_field)| {
            fk.add_key_fields(*parent_field, *child_field)
        })
        .with_on_delete(ForeignKeyAction::Restrict)
        .with_on_update(ForeignKeyAction::Cascade)
        .with_child_index()
}

fn add_translated(table: &mut TableSchema, prefix: &str, length: u32) {
    for lang in ["EN", "FR", "DE", "IT"] {
        table.add_field(varchar(&format!("{prefix}{lang}"), length), false);
    }
}

fn modification() -> TableSchema {
    let mut t = table("Modification_tbl");
    t.add_field(varchar("Code_PK", 10), true);
    t.add_field(integer("SortOrder"), false);
    add_translated(&mut t, "Name", 50);
    t
}

fn vehicle_type() -> TableSchema {
    let mut t = table("VehicleType_tbl");
    t.add_field(id_pk(), true);
    t.add_field(varchar("Type", 50), false);
    t.add_field(varchar("SubType", 50), false);
    t.add_field(varchar("SeriesNumber", 50), false);
    t
}

fn vehicle_type_unit() -> TableSchema {
    let mut t = table("VehicleType_Unit_tbl");
    t.add_field(integer("VehicleType_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("VehicleType_tbl", &[("Id_PK", "VehicleType_Id_FK")]));
    t.add_field(integer("Unit_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("Unit_tbl", &[("Id_PK", "Unit_Id_FK")]));
    t
}

fn vehicle_type_link() -> TableSchema {
    let mut t = table("VehicleType_Link_tbl");
    t.add_field(integer("VehicleTypeStart_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("VehicleType_tbl", &[("Id_PK", "VehicleTypeStart_Id_FK")]));
    t.add_field(integer("VehicleTypeEnd_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("VehicleType_tbl", &[("Id_PK", "VehicleTypeEnd_Id_FK")]));
    t.add_field(integer("UnitConnectionStart_Id_FK").required(), true);
    t.add_field(integer("UnitConnectionEnd_Id_FK").required(), true);
    t.add_field(integer("Link_Version_FK").required(), true);
    t.add_field(varchar("Link_Modification_Code_FK", 10).required(), true);
    t.add_foreign_key(foreign_key(
        "Link_tbl",
        &[
            ("UnitConnectionStart_Id_FK", "UnitConnectionStart_Id_FK"),
            ("UnitConnectionEnd_Id_FK", "UnitConnectionEnd_Id_FK"),
            ("Version_FK", "Link_Version_FK"),
            ("Modification_Code_FK", "Link_Modification_Code_FK"),
        ],
    ));
    t
}

fn connection_type() -> TableSchema {
    let mut t = table("ConnectionType_tbl");
    t.add_field(varchar("Code_PK", 1), true);
    add_translated(&mut t, "Name", 50);
    t
}

fn connector() -> TableSchema {
    let mut t = table("Connector_tbl");
    t.add_field(id_pk(), true);
    t.add_field(varchar("Gender", 50), false);
    t.add_field(integer("ContactQty"), false);
    for name in [
        "Form",
        "Manufacturer",
        "Series",
        "Housing",
        "Insert",
        "InsertRotation",
        "ManufacturerConfigCode",
        "ManufacturerArticleCode",
    ] {
        t.add_field(varchar(name, 50), false);
    }
    t
}

fn connector_contact() -> TableSchema {
    let mut t = table("ConnectorContact_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Connector_Id_FK").required(), false);
    t.add_foreign_key(foreign_key("Connector_tbl", &[("Id_PK", "Connector_Id_FK")]));
    t.add_field(varchar("Name", 50), false);
    t.add_field(varchar("ConnectionType_Code_FK", 1), false);
    t.add_foreign_key(foreign_key("ConnectionType_tbl", &[("Code_PK", "ConnectionType_Code_FK")]));
    t
}

fn article() -> TableSchema {
    let mut t = table("Article_tbl");
    t.add_field(id_pk(), true);
    t.add_field(varchar("ArticleCode", 50), false);
    add_translated(&mut t, "Designation", 150);
    for name in [
        "IdentificationDocument",
        "Manufacturer",
        "ManufacturerType",
        "ManufacturerCode",
        "ManufacturerIdentificationDocument",
    ] {
        t.add_field(varchar(name, 100), false);
    }
    t.add_field(varchar("Unit", 10).required().with_default("pce"), false);
    t
}

fn article_component() -> TableSchema {
    let mut t = table("ArticleComponent_tbl");
    t.add_field(integer("Composite_Id_FK"), true);
    t.add_foreign_key(foreign_key("Article_tbl", &[("Id_PK", "Composite_Id_FK")]));
    t.add_field(integer("Component_Id_FK"), true);
    t.add_foreign_key(foreign_key("Article_tbl", &[("Id_PK", "Component_Id_FK")]));
    t.add_field(double("ComponentQty").required(), false);
    t.add_field(varchar("ComponentQtyUnit", 10).required(), false);
    t
}

fn article_connector() -> TableSchema {
    let mut t = table("ArticleConnector_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Article_Id_FK").required(), false);
    t.add_foreign_key(foreign_key("Article_tbl", &[("Id_PK", "Article_Id_FK")]));
    t.add_field(integer("Connector_Id_FK"), false);
    t.add_foreign_key(foreign_key("Connector_tbl", &[("Id_PK", "Connector_Id_FK")]));
    t.add_field(varchar("Name", 30), false);
    t
}

fn article_connection() -> TableSchema {
    let mut t = table("ArticleConnection_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Article_Id_FK").required(), false);
    t.add_foreign_key(foreign_key("Article_tbl", &[("Id_PK", "Article_Id_FK")]));
    t.add_field(integer("ArticleConnector_Id_FK"), false);
    t.add_foreign_key(foreign_key("ArticleConnector_tbl", &[("Id_PK", "ArticleConnector_Id_FK")]));
    t.add_field(varchar("ConnectionType_Code_FK", 1).required(), false);
    t.add_foreign_key(foreign_key("ConnectionType_tbl", &[("Code_PK", "ConnectionType_Code_FK")]));
    t.add_field(varchar("ArticleContactName", 30).required(), false);
    t.add_field(double("Resistance").with_default(0.0), false);
    t.add_field(varchar("IoType", 30), false);
    add_translated(&mut t, "Function", 100);
    t
}

fn article_link() -> TableSchema {
    let mut t = table("ArticleLink_tbl");
    t.add_field(integer("ArticleConnectionStart_Id_FK").required(), true);
    t.add_foreign_key(foreign_key(
        "ArticleConnection_tbl",
        &[("Id_PK", "ArticleConnectionStart_Id_FK")],
    ));
    t.add_field(integer("ArticleConnectionEnd_Id_FK").required(), true);
    t.add_foreign_key(foreign_key(
        "ArticleConnection_tbl",
        &[("Id_PK", "ArticleConnectionEnd_Id_FK")],
    ));
    t.add_field(double("SinceVersion"), false);
    t.add_field(varchar("Modification", 20), false);
    t.add_field(varchar("Identification", 50), false);
    t.add_field(varchar("LinkDirection_Code_FK", 10).required(), false);
    t.add_foreign_key(foreign_key("LinkDirection_tbl", &[("Code_PK", "LinkDirection_Code_FK")]));
    t.add_field(varchar("LinkType_Code_FK", 10).required(), false);
    t.add_foreign_key(foreign_key("LinkType_tbl", &[("Code_PK", "LinkType_Code_FK")]));
    t.add_field(double("Resistance"), false);
    t
}

fn unit() -> TableSchema {
    let mut t = table("Unit_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Composite_Id_FK"), false);
    t.add_foreign_key(foreign_key("Unit_tbl", &[("Id_PK", "Composite_Id_FK")]));
    t.add_field(integer("Article_Id_FK"), false);
    t.add_foreign_key(foreign_key("Article_tbl", &[("Id_PK", "Article_Id_FK")]));
    t.add_field(varchar("Coordinate", 10), false);
    t.add_field(varchar("Cabinet", 30), false);
    t.add_field(varchar("SchemaPosition", 50), false);
    t.add_field(varchar("Alias", 50), false);
    t
}

fn unit_connector() -> TableSchema {
    let mut t = table("UnitConnector_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Unit_Id_FK").required(), false);
    t.add_foreign_key(foreign_key("Unit_tbl", &[("Id_PK", "Unit_Id_FK")]));
    t.add_field(integer("Connector_Id_FK"), false);
    t.add_foreign_key(foreign_key("Connector_tbl", &[("Id_PK", "Connector_Id_FK")]));
    t.add_field(integer("ArticleConnector_Id_FK"), false);
    t.add_foreign_key(foreign_key("ArticleConnector_tbl", &[("Id_PK", "ArticleConnector_Id_FK")]));
    t.add_field(varchar("Name", 30), false);
    t
}

fn unit_connection() -> TableSchema {
    let mut t = table("UnitConnection_tbl");
    t.add_field(id_pk(), true);
    t.add_field(integer("Unit_Id_FK").required(), false);
    t.add_foreign_key(foreign_key("Unit_tbl", &[("Id_PK", "Unit_Id_FK")]));
    t.add_field(integer("UnitConnector_Id_FK"), false);
    t.add_foreign_key(foreign_key("UnitConnector_tbl", &[("Id_PK", "UnitConnector_Id_FK")]));
    t.add_field(integer("ArticleConnection_Id_FK"), false);
    t.add_foreign_key(foreign_key(
        "ArticleConnection_tbl",
        &[("Id_PK", "ArticleConnection_Id_FK")],
    ));
    t.add_field(varchar("ConnectionType_Code_FK", 1).required(), false);
    t.add_foreign_key(foreign_key("ConnectionType_tbl", &[("Code_PK", "ConnectionType_Code_FK")]));
    t.add_field(varchar("UnitContactName", 30), false);
    t.add_field(double("Resistance").with_default(0.0), false);
    t.add_field(Field::new("IsATestPoint", FieldType::Boolean), false);
    t.add_field(varchar("SchemaPage", 20), false);
    add_translated(&mut t, "Function", 100);
    t.add_field(varchar("SignalName", 50), false);
    t.add_field(integer("SwAddress"), false);
    t
}

fn link_direction() -> TableSchema {
    let mut t = table("LinkDirection_tbl");
    t.add_field(varchar("Code_PK", 10), true);
    t.add_field(varchar("PictureAscii", 50), false);
    add_translated(&mut t, "Name", 50);
    t
}

fn link_type() -> TableSchema {
    let mut t = table("LinkType_tbl");
    t.add_field(varchar("Code_PK", 10), true);
    add_translated(&mut t, "Name", 50);
    t.add_field(varchar("ValueUnit", 10), false);
    t
}

fn link_version() -> TableSchema {
    let mut t = table("LinkVersion_tbl");
    t.add_field(integer("Version_PK"), true);
    t.add_field(double("Version"), false);
    t
}

fn wire() -> TableSchema {
    let mut t = table("Wire_tbl");
    t.add_field(id_pk(), true);
    t.add_field(varchar("ArticleCode", 50), false);
    t.add_field(varchar("Manufacturer", 100), false);
    t.add_field(varchar("Model", 100), false);
    t.add_field(varchar("ManufacturerArticleCode", 50), false);
    t.add_field(double("Section"), false);
    t.add_field(double("ExternalDiameter"), false);
    t.add_field(double("LineicResistance"), false);
    add_translated(&mut t, "Color", 50);
    t
}

fn link_beam() -> TableSchema {
    let mut t = table("LinkBeam_tbl");
    t.add_field(id_pk(), true);
    t.add_field(varchar("Identification", 50), false);
    t
}

fn link_beam_unit(name: &str) -> TableSchema {
    let mut t = table(name);
    t.add_field(integer("Unit_Id_FK").auto_value(), true);
    t.add_foreign_key(foreign_key("Unit_tbl", &[("Id_PK", "Unit_Id_FK")]));
    t.add_field(integer("LinkBeam_Id_FK").auto_value(), true);
    t.add_foreign_key(foreign_key("LinkBeam_tbl", &[("Id_PK", "LinkBeam_Id_FK")]));
    t
}

fn link_beam_unit_start() -> TableSchema {
    link_beam_unit("LinkBeam_UnitStart_tbl")
}

fn link_beam_unit_end() -> TableSchema {
    link_beam_unit("LinkBeam_UnitEnd_tbl")
}

fn link() -> TableSchema {
    let mut t = table("Link_tbl");
    t.add_field(integer("UnitConnectionStart_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("UnitConnection_tbl", &[("Id_PK", "UnitConnectionStart_Id_FK")]));
    t.add_field(integer("UnitConnectionEnd_Id_FK").required(), true);
    t.add_foreign_key(foreign_key("UnitConnection_tbl", &[("Id_PK", "UnitConnectionEnd_Id_FK")]));
    t.add_field(integer("Version_FK").required(), true);
    t.add_foreign_key(foreign_key("LinkVersion_tbl", &[("Version_PK", "Version_FK")]));
    t.add_field(varchar("Modification_Code_FK", 10).required(), true);
    t.add_foreign_key(foreign_key("Modification_tbl", &[("Code_PK", "Modification_Code_FK")]));
    t.add_field(integer("ArticleConnectionStart_Id_FK"), false);
    t.add_field(integer("ArticleConnectionEnd_Id_FK"), false);
    t.add_foreign_key(foreign_key(
        "ArticleLink_tbl",
        &[
            ("ArticleConnectionStart_Id_FK", "ArticleConnectionStart_Id_FK"),
            ("ArticleConnectionEnd_Id_FK", "ArticleConnectionEnd_Id_FK"),
        ],
    ));
    t.add_field(integer("Wire_Id_FK"), false);
    t.add_foreign_key(foreign_key("Wire_tbl", &[("Id_PK", "Wire_Id_FK")]));
    t.add_field(integer("LinkBeam_Id_FK"), false);
    t.add_foreign_key(foreign_key("LinkBeam_tbl", &[("Id_PK", "LinkBeam_Id_FK")]));
    t.add_field(varchar("Identification", 50), false);
    t.add_field(varchar("LinkDirection_Code_FK", 10).required(), false);
    t.add_foreign_key(foreign_key("LinkDirection_tbl", &[("Code_PK", "LinkDirection_Code_FK")]));
    t.add_field(varchar("LinkType_Code_FK", 10).required(), false);
    t.add_foreign_key(foreign_key("LinkType_tbl", &[("Code_PK", "LinkType_Code_FK")]));
    t.add_field(double("Resistance"), false);
    t.add_field(double("Length"), false);
    t.add_field(varchar("Remarks", 200), false);
    t
}
