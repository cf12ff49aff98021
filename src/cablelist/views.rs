//! Cable list views.
//!
//! Joins are inferred from the declared foreign keys where a single one links
//! the two tables; the others are spelled out field by field.

use crate::schema::{DatabaseSchema, JoinError};
use crate::view::{JoinClause, SelectField, Table, ViewSchema};

type ViewBuilder = fn(&DatabaseSchema) -> Result<ViewSchema, JoinError>;

/// View builders in creation order, with the name each one produces.
pub(super) const VIEWS: [(&str, ViewBuilder); 17] = [
    ("VehicleType_Unit_view", vehicle_type_unit),
    ("ArticleComponent_view", article_component),
    ("ArticleLink_view", article_link),
    ("ArticleComponentUsage_view", article_component_usage),
    ("ArticleConnector_view", article_connector),
    ("ArticleConnection_view", article_connection),
    ("Unit_view", unit),
    ("UnitComponent_view", unit_component),
    ("UnitConnector_view", unit_connector),
    ("UnitConnectorUsage_view", unit_connector_usage),
    ("UnitConnection_view", unit_connection),
    ("ArticleLink_UnitConnection_view", article_link_unit_connection),
    ("UnitLink_view", unit_link),
    ("Unit_VehicleType_view", unit_vehicle_type),
    ("LinkList_view", link_list),
    ("LinkBeam_UnitStart_view", link_beam_unit_start),
    ("LinkBeam_UnitEnd_view", link_beam_unit_end),
];

fn t(table_name: &str, alias: &str) -> Table {
    Table::with_alias(table_name, alias)
}

/// Single-key join written out explicitly.
fn explicit_join(main: &Table, joined: &Table, main_field: &str, joined_field: &str) -> JoinClause {
    let mut join = JoinClause::new(main.clone(), joined.clone());
    join.add_key_fields(main_field, joined_field);
    join
}

fn aliased(view: &mut ViewSchema, table: &Table, fields: &[(&str, &str)]) {
    for (field, alias) in fields {
        view.add_select_field(table, SelectField::with_alias(*field, *alias));
    }
}

const DESIGNATIONS: [&str; 4] = ["DesignationEN", "DesignationFR", "DesignationDE", "DesignationIT"];

fn vehicle_type_unit(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let vtu = t("VehicleType_Unit_tbl", "VTU");
    let vt = t("VehicleType_tbl", "VT");
    let u = t("Unit_tbl", "U");
    let a = t("Article_tbl", "A");
    let mut view = ViewSchema::new("VehicleType_Unit_view", vtu.clone());
    view.add_select_fields(&vt, ["Type", "SubType", "SeriesNumber"]);
    view.add_select_fields(&u, ["Coordinate", "Cabinet", "SchemaPosition", "Alias"]);
    view.add_select_fields(&a, ["ArticleCode", "Manufacturer", "ManufacturerCode"]);
    view.add_select_fields(&a, DESIGNATIONS);
    view.add_select_fields(&vtu, ["VehicleType_Id_FK", "Unit_Id_FK"]);
    view.add_join_clause(schema.join_clause(&vtu, &vt)?);
    view.add_join_clause(schema.join_clause(&vtu, &u)?);
    view.add_join_clause(schema.join_clause(&u, &a)?.left_join());
    Ok(view)
}

fn article_component(_: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let ac = t("ArticleComponent_tbl", "AC");
    let a = t("Article_tbl", "A");
    let mut view = ViewSchema::new("ArticleComponent_view", ac.clone());
    aliased(
        &mut view,
        &ac,
        &[("Composite_Id_FK", "Article_Id_PK"), ("Component_Id_FK", "Component_Id_PK")],
    );
    view.add_select_fields(&ac, ["ComponentQty", "ComponentQtyUnit"]);
    view.add_select_fields(&a, ["ArticleCode"]);
    view.add_select_fields(&a, DESIGNATIONS);
    view.add_join_clause(explicit_join(&ac, &a, "Component_Id_FK", "Id_PK"));
    Ok(view)
}

fn article_component_usage(_: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let ac = t("ArticleComponent_tbl", "AC");
    let a = t("Article_tbl", "A");
    let mut view = ViewSchema::new("ArticleComponentUsage_view", ac.clone());
    aliased(
        &mut view,
        &ac,
        &[("Component_Id_FK", "Component_Id_PK"), ("Composite_Id_FK", "Article_Id_PK")],
    );
    view.add_select_fields(&a, ["ArticleCode"]);
    view.add_select_fields(&a, DESIGNATIONS);
    view.add_join_clause(explicit_join(&ac, &a, "Composite_Id_FK", "Id_PK"));
    Ok(view)
}

fn article_link(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let al = t("ArticleLink_tbl", "AL");
    let acnxs = t("ArticleConnection_tbl", "ACNXS");
    let acnxe = t("ArticleConnection_tbl", "ACNXE");
    let acs = t("ArticleConnector_tbl", "ACS");
    let ace = t("ArticleConnector_tbl", "ACE");
    let lt = t("LinkType_tbl", "LT");
    let ld = t("LinkDirection_tbl", "LD");

    let mut view = ViewSchema::new("ArticleLink_view", al.clone());
    view.add_select_fields(
        &al,
        [
            "LinkType_Code_FK",
            "LinkDirection_Code_FK",
            "ArticleConnectionStart_Id_FK",
            "ArticleConnectionEnd_Id_FK",
            "Identification",
        ],
    );
    aliased(
        &mut view,
        &lt,
        &[
            ("NameEN", "LinkTypeNameEN"),
            ("NameFR", "LinkTypeNameFR"),
            ("NameDE", "LinkTypeNameDE"),
            ("NameIT", "LinkTypeNameIT"),
        ],
    );
    view.add_select_fields(&al, ["Resistance"]);
    view.add_select_fields(&lt, ["ValueUnit"]);
    for (connection, connector, side) in [(&acnxs, &acs, "Start"), (&acnxe, &ace, "End")] {
        view.add_select_field(
            connection,
            SelectField::with_alias("Article_Id_FK", format!("{side}Article_Id_FK")),
        );
        view.add_select_field(
            connector,
            SelectField::with_alias("Name", format!("{side}ArticleConnectorName")),
        );
        for field in [
            "ArticleContactName",
            "IoType",
            "FunctionEN",
            "FunctionFR",
            "FunctionDE",
            "FunctionIT",
        ] {
            view.add_select_field(connection, SelectField::with_alias(field, format!("{side}{field}")));
        }
        if side == "Start" {
            aliased(&mut view, &ld, &[("PictureAscii", "LinkDirectionPictureAscii")]);
        }
    }

    view.add_join_clause(explicit_join(&al, &acnxs, "ArticleConnectionStart_Id_FK", "Id_PK"));
    view.add_join_clause(explicit_join(&al, &acnxe, "ArticleConnectionEnd_Id_FK", "Id_PK"));
    view.add_join_clause(schema.join_clause(&acnxs, &acs)?.left_join());
    view.add_join_clause(schema.join_clause(&acnxe, &ace)?.left_join());
    view.add_join_clause(schema.join_clause(&al, &lt)?);
    view.add_join_clause(schema.join_clause(&al, &ld)?);
    Ok(view)
}

fn article_connector(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let acnr = t("ArticleConnector_tbl", "ACNR");
    let cnr = t("Connector_tbl", "CNR");
    let mut view = ViewSchema::new("ArticleConnector_view", acnr.clone());
    view.add_select_fields(&acnr, ["Id_PK", "Article_Id_FK", "Connector_Id_FK"]);
    aliased(&mut view, &acnr, &[("Name", "ArticleConnectorName")]);
    view.add_select_fields(
        &cnr,
        ["Gender", "Form", "Manufacturer", "ManufacturerConfigCode", "ManufacturerArticleCode"],
    );
    view.add_join_clause(schema.join_clause(&acnr, &cnr)?.left_join());
    Ok(view)
}

fn connection_type_names(view: &mut ViewSchema, ct: &Table) {
    aliased(
        view,
        ct,
        &[
            ("NameEN", "ConnectionTypeEN"),
            ("NameFR", "ConnectionTypeFR"),
            ("NameDE", "ConnectionTypeDE"),
            ("NameIT", "ConnectionTypeIT"),
        ],
    );
}

fn article_connection(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let acnx = t("ArticleConnection_tbl", "ACNX");
    let acnr = t("ArticleConnector_tbl", "ACNR");
    let ct = t("ConnectionType_tbl", "CT");
    let mut view = ViewSchema::new("ArticleConnection_view", acnx.clone());
    view.add_select_fields(&acnr, ["Connector_Id_FK"]);
    aliased(&mut view, &acnr, &[("Name", "ArticleConnectorName")]);
    view.add_select_fields(
        &acnx,
        [
            "Id_PK",
            "Article_Id_FK",
            "ArticleConnector_Id_FK",
            "ConnectionType_Code_FK",
            "ArticleContactName",
        ],
    );
    connection_type_names(&mut view, &ct);
    view.add_select_fields(
        &acnx,
        ["Resistance", "IoType", "FunctionEN", "FunctionFR", "FunctionDE", "FunctionIT"],
    );
    view.add_join_clause(schema.join_clause(&acnx, &acnr)?.left_join());
    view.add_join_clause(schema.join_clause(&acnx, &ct)?);
    Ok(view)
}

fn unit(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let u = t("Unit_tbl", "U");
    let a = t("Article_tbl", "A");
    let vtu = t("VehicleType_Unit_tbl", "VTU");
    let vt = t("VehicleType_tbl", "VT");
    let mut view = ViewSchema::new("Unit_view", u.clone());
    aliased(&mut view, &u, &[("Id_PK", "Unit_Id_PK")]);
    view.add_select_fields(&u, ["SchemaPosition", "Alias", "Coordinate", "Cabinet"]);
    aliased(&mut view, &vt, &[("Id_PK", "VehicleType_Id_PK")]);
    view.add_select_fields(&vt, ["Type", "SubType", "SeriesNumber"]);
    aliased(&mut view, &a, &[("Id_PK", "Article_Id_PK")]);
    view.add_select_fields(&a, ["ArticleCode"]);
    view.add_select_fields(&a, DESIGNATIONS);
    view.add_join_clause(schema.join_clause(&u, &a)?.left_join());
    view.add_join_clause(schema.join_clause(&u, &vtu)?);
    view.add_join_clause(schema.join_clause(&vtu, &vt)?);
    Ok(view)
}

fn unit_component(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let composite = t("Unit_tbl", "UnitComposite");
    let u = t("Unit_tbl", "U");
    let a = t("Article_tbl", "A");
    let mut view = ViewSchema::new("UnitComponent_view", composite.clone());
    aliased(&mut view, &composite, &[("Id_PK", "Unit_Id_PK")]);
    aliased(&mut view, &u, &[("Id_PK", "UnitComponent_Id_PK")]);
    view.add_select_fields(
        &u,
        ["Article_Id_FK", "Coordinate", "Cabinet", "SchemaPosition", "Alias"],
    );
    aliased(&mut view, &a, &[("Id_PK", "Article_Id_PK")]);
    view.add_select_fields(&a, ["ArticleCode"]);
    view.add_select_fields(&a, DESIGNATIONS);
    view.add_join_clause(explicit_join(&composite, &u, "Id_PK", "Composite_Id_FK"));
    view.add_join_clause(schema.join_clause(&u, &a)?.left_join());
    Ok(view)
}

fn unit_connector(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let ucnr = t("UnitConnector_tbl", "UCNR");
    let cnr = t("Connector_tbl", "CNR");
    let acnr = t("ArticleConnector_tbl", "ACNR");
    let mut view = ViewSchema::new("UnitConnector_view", ucnr.clone());
    view.add_select_fields(
        &ucnr,
        ["Id_PK", "Unit_Id_FK", "Connector_Id_FK", "ArticleConnector_Id_FK"],
    );
    aliased(&mut view, &ucnr, &[("Name", "ArticleConnectorName")]);
    view.add_select_fields(
        &cnr,
        [
            "Gender",
            "Form",
            "Manufacturer",
            "Housing",
            "Insert",
            "InsertRotation",
            "ManufacturerConfigCode",
            "ManufacturerArticleCode",
        ],
    );
    view.add_join_clause(schema.join_clause(&ucnr, &cnr)?.left_join());
    view.add_join_clause(schema.join_clause(&ucnr, &acnr)?.left_join());
    Ok(view)
}

fn unit_connector_usage(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let ucnr = t("UnitConnector_tbl", "UCNR");
    let u = t("Unit_tbl", "U");
    let vtu = t("VehicleType_Unit_tbl", "VTU");
    let vt = t("VehicleType_tbl", "VT");
    let mut view = ViewSchema::new("UnitConnectorUsage_view", ucnr.clone());
    view.add_select_fields(
        &ucnr,
        ["Id_PK", "Unit_Id_FK", "Connector_Id_FK", "ArticleConnector_Id_FK"],
    );
    aliased(&mut view, &ucnr, &[("Name", "UnitConnectorName")]);
    view.add_select_fields(&u, ["SchemaPosition", "Alias"]);
    view.add_select_fields(&vt, ["Type", "SubType", "SeriesNumber"]);
    view.add_join_clause(schema.join_clause(&ucnr, &u)?);
    view.add_join_clause(schema.join_clause(&u, &vtu)?);
    view.add_join_clause(schema.join_clause(&vtu, &vt)?);
    Ok(view)
}

fn unit_connection(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let ucnx = t("UnitConnection_tbl", "UCNX");
    let ucnr = t("UnitConnector_tbl", "UCNR");
    let acnr = t("ArticleConnector_tbl", "ACNR");
    let acnx = t("ArticleConnection_tbl", "ACNX");
    let ct = t("ConnectionType_tbl", "CT");
    let mut view = ViewSchema::new("UnitConnection_view", ucnx.clone());
    aliased(
        &mut view,
        &ucnr,
        &[
            ("Connector_Id_FK", "UCNR_Connector_Id_FK"),
            ("Unit_Id_FK", "UCNR_Unit_Id_FK"),
            ("Name", "UnitConnectorName"),
        ],
    );
    view.add_select_fields(
        &ucnx,
        [
            "Id_PK",
            "Unit_Id_FK",
            "UnitConnector_Id_FK",
            "ConnectionType_Code_FK",
            "ArticleConnection_Id_FK",
            "UnitContactName",
        ],
    );
    connection_type_names(&mut view, &ct);
    aliased(&mut view, &ucnx, &[("Resistance", "UnitConnectionResistance")]);
    view.add_select_fields(&ucnx, ["SchemaPage"]);
    aliased(
        &mut view,
        &ucnx,
        &[
            ("FunctionEN", "UnitFunctionEN"),
            ("FunctionFR", "UnitFunctionFR"),
            ("FunctionDE", "UnitFunctionDE"),
            ("FunctionIT", "UnitFunctionIT"),
        ],
    );
    view.add_select_fields(&ucnx, ["SignalName", "SwAddress"]);
    aliased(
        &mut view,
        &acnr,
        &[
            ("Connector_Id_FK", "ACNR_Connector_Id_FK"),
            ("Article_Id_FK", "ACNR_Article_Id_FK"),
            ("Name", "ArticleConnectorName"),
        ],
    );
    view.add_select_fields(&acnx, ["ArticleConnector_Id_FK", "Article_Id_FK"]);
    aliased(&mut view, &acnx, &[("ConnectionType_Code_FK", "ACNX_ConnectionType_Code_FK")]);
    view.add_select_fields(&acnx, ["ArticleContactName", "IoType"]);
    aliased(
        &mut view,
        &acnx,
        &[
            ("FunctionEN", "ArticleFunctionEN"),
            ("FunctionFR", "ArticleFunctionFR"),
            ("FunctionDE", "ArticleFunctionDE"),
            ("FunctionIT", "ArticleFunctionIT"),
        ],
    );
    view.add_join_clause(schema.join_clause(&ucnx, &ucnr)?.left_join());
    view.add_join_clause(schema.join_clause(&ucnr, &acnr)?.left_join());
    view.add_join_clause(schema.join_clause(&ucnx, &acnx)?.left_join());
    view.add_join_clause(schema.join_clause(&ucnx, &ct)?);
    Ok(view)
}

fn article_link_unit_connection(_: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let al = t("ArticleLink_tbl", "AL");
    let ucnxs = t("UnitConnection_tbl", "UCNXS");
    let ucnxe = t("UnitConnection_tbl", "UCNXE");
    let mut view = ViewSchema::new("ArticleLink_UnitConnection_view", al.clone());
    aliased(&mut view, &ucnxs, &[("Id_PK", "UnitConnectionStart_Id_FK")]);
    aliased(&mut view, &ucnxe, &[("Id_PK", "UnitConnectionEnd_Id_FK")]);
    aliased(&mut view, &ucnxs, &[("Unit_Id_FK", "StartUnit_Id_FK")]);
    aliased(&mut view, &ucnxe, &[("Unit_Id_FK", "EndUnit_Id_FK")]);
    view.add_select_fields(
        &al,
        [
            "ArticleConnectionStart_Id_FK",
            "ArticleConnectionEnd_Id_FK",
            "LinkType_Code_FK",
            "LinkDirection_Code_FK",
            "Identification",
            "Resistance",
            "SinceVersion",
            "Modification",
        ],
    );
    view.add_join_clause(explicit_join(
        &al,
        &ucnxs,
        "ArticleConnectionStart_Id_FK",
        "ArticleConnection_Id_FK",
    ));
    view.add_join_clause(explicit_join(
        &al,
        &ucnxe,
        "ArticleConnectionEnd_Id_FK",
        "ArticleConnection_Id_FK",
    ));
    Ok(view)
}

/// Tables shared by the two link listing views.
struct LinkTables {
    lnk: Table,
    w: Table,
    ucnxs: Table,
    ucnxe: Table,
    ucs: Table,
    uce: Table,
    us: Table,
    ue: Table,
    lt: Table,
    ld: Table,
}

impl LinkTables {
    fn new() -> Self {
        Self {
            lnk: t("Link_tbl", "LNK"),
            w: t("Wire_tbl", "W"),
            ucnxs: t("UnitConnection_tbl", "UCNXS"),
            ucnxe: t("UnitConnection_tbl", "UCNXE"),
            ucs: t("UnitConnector_tbl", "UCS"),
            uce: t("UnitConnector_tbl", "UCE"),
            us: t("Unit_tbl", "US"),
            ue: t("Unit_tbl", "UE"),
            lt: t("LinkType_tbl", "LT"),
            ld: t("LinkDirection_tbl", "LD"),
        }
    }

    /// Link, both unit ends, wire and type columns.
    fn add_link_fields(&self, view: &mut ViewSchema) {
        view.add_select_fields(&self.lnk, ["Identification", "LinkBeam_Id_FK"]);
        for (unit, connector, connection, side) in [
            (&self.us, &self.ucs, &self.ucnxs, "Start"),
            (&self.ue, &self.uce, &self.ucnxe, "End"),
        ] {
            for field in ["SchemaPosition", "Alias"] {
                view.add_select_field(unit, SelectField::with_alias(field, format!("{side}{field}")));
            }
            view.add_select_field(
                connector,
                SelectField::with_alias("Name", format!("{side}UnitConnectorName")),
            );
            view.add_select_field(
                connection,
                SelectField::with_alias("UnitContactName", format!("{side}UnitContactName")),
            );
            view.add_select_field(
                connection,
                SelectField::with_alias("Resistance", format!("{side}UnitConnectionResistance")),
            );
        }
        aliased(view, &self.lt, &[("NameEN", "LinkTypeNameEN")]);
        view.add_select_fields(&self.lnk, ["Length", "Resistance"]);
        aliased(view, &self.w, &[("Model", "WireModel")]);
        view.add_select_fields(&self.w, ["Section", "ColorEN"]);
        aliased(view, &self.w, &[("ArticleCode", "WireArticleCode")]);
        view.add_select_fields(&self.lt, ["ValueUnit"]);
        aliased(view, &self.ld, &[("PictureAscii", "LinkDirectionPictureAscii")]);
        for (connection, side) in [(&self.ucnxs, "Start"), (&self.ucnxe, "End")] {
            for field in ["SchemaPage", "FunctionEN", "SignalName", "SwAddress"] {
                view.add_select_field(
                    connection,
                    SelectField::with_alias(field, format!("{side}{field}")),
                );
            }
        }
        view.add_select_fields(&self.lnk, ["UnitConnectionStart_Id_FK", "UnitConnectionEnd_Id_FK"]);
        for (connection, side) in [(&self.ucnxs, "Start"), (&self.ucnxe, "End")] {
            for field in ["UnitConnector_Id_FK", "Unit_Id_FK"] {
                view.add_select_field(
                    connection,
                    SelectField::with_alias(field, format!("{side}{field}")),
                );
            }
        }
        view.add_select_fields(
            &self.lnk,
            [
                "LinkType_Code_FK",
                "LinkDirection_Code_FK",
                "ArticleConnectionStart_Id_FK",
                "ArticleConnectionEnd_Id_FK",
                "Version_FK",
                "Modification_Code_FK",
            ],
        );
    }

    /// Joins from the link to both unit connections, connectors and units.
    fn add_unit_joins(&self, schema: &DatabaseSchema, view: &mut ViewSchema) -> Result<(), JoinError> {
        view.add_join_clause(explicit_join(&self.lnk, &self.ucnxs, "UnitConnectionStart_Id_FK", "Id_PK"));
        view.add_join_clause(explicit_join(&self.lnk, &self.ucnxe, "UnitConnectionEnd_Id_FK", "Id_PK"));
        view.add_join_clause(schema.join_clause(&self.ucnxs, &self.ucs)?.left_join());
        view.add_join_clause(schema.join_clause(&self.ucnxe, &self.uce)?.left_join());
        view.add_join_clause(schema.join_clause(&self.ucnxs, &self.us)?);
        view.add_join_clause(schema.join_clause(&self.ucnxe, &self.ue)?);
        Ok(())
    }
}

fn unit_link(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let tables = LinkTables::new();
    let lv = t("LinkVersion_tbl", "LV");
    let m = t("Modification_tbl", "M");
    let lnk = &tables.lnk;

    let mut view = ViewSchema::new("UnitLink_view", lnk.clone());
    view.add_select_fields(&lv, ["Version"]);
    aliased(
        &mut view,
        &m,
        &[
            ("NameEN", "ModificationEN"),
            ("NameFR", "ModificationFR"),
            ("NameDE", "ModificationDE"),
            ("NameIT", "ModificationIT"),
            ("SortOrder", "ModificationSortOrder"),
        ],
    );
    tables.add_link_fields(&mut view);

    view.add_join_clause(schema.join_clause(lnk, &lv)?.left_join());
    view.add_join_clause(schema.join_clause(lnk, &m)?.left_join());
    view.add_join_clause(schema.join_clause(lnk, &tables.w)?.left_join());
    tables.add_unit_joins(schema, &mut view)?;
    view.add_join_clause(schema.join_clause(lnk, &tables.lt)?);
    view.add_join_clause(schema.join_clause(lnk, &tables.ld)?);
    Ok(view)
}

fn unit_vehicle_type(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let vt = t("VehicleType_tbl", "VT");
    let vtu = t("VehicleType_Unit_tbl", "VTU");
    let mut view = ViewSchema::new("Unit_VehicleType_view", vt.clone());
    view.add_select_fields(&vt, ["Type", "SubType", "SeriesNumber"]);
    view.add_select_fields(&vtu, ["VehicleType_Id_FK", "Unit_Id_FK"]);
    view.add_join_clause(schema.join_clause(&vt, &vtu)?);
    Ok(view)
}

fn link_list(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    let tables = LinkTables::new();
    let vtl = t("VehicleType_Link_tbl", "VTL");
    let vts = t("VehicleType_tbl", "VTS");
    let vte = t("VehicleType_tbl", "VTE");
    let lnk = &tables.lnk;

    let mut view = ViewSchema::new("LinkList_view", lnk.clone());
    for (vehicle, side) in [(&vts, "Start"), (&vte, "End")] {
        for (field, suffix) in [
            ("Id_PK", "VehicleType_Id_PK"),
            ("Type", "VehicleType"),
            ("SubType", "VehicleSubType"),
            ("SeriesNumber", "VehicleSerie"),
        ] {
            view.add_select_field(vehicle, SelectField::with_alias(field, format!("{side}{suffix}")));
        }
    }
    tables.add_link_fields(&mut view);

    tables.add_unit_joins(schema, &mut view)?;
    view.add_join_clause(schema.join_clause(lnk, &vtl)?.left_join());
    view.add_join_clause(explicit_join(&vtl, &vts, "VehicleTypeStart_Id_FK", "Id_PK").left_join());
    view.add_join_clause(explicit_join(&vtl, &vte, "VehicleTypeEnd_Id_FK", "Id_PK").left_join());
    view.add_join_clause(schema.join_clause(lnk, &tables.lt)?);
    view.add_join_clause(schema.join_clause(lnk, &tables.ld)?);
    view.add_join_clause(schema.join_clause(lnk, &tables.w)?.left_join());
    Ok(view)
}

fn link_beam_unit(
    schema: &DatabaseSchema,
    name: &str,
    table: Table,
) -> Result<ViewSchema, JoinError> {
    let u = t("Unit_tbl", "U");
    let mut view = ViewSchema::new(name, table.clone());
    view.add_select_fields(&table, ["Unit_Id_FK", "LinkBeam_Id_FK"]);
    view.add_select_field(&u, SelectField::wildcard());
    view.add_join_clause(schema.join_clause(&table, &u)?);
    Ok(view)
}

fn link_beam_unit_start(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    link_beam_unit(schema, "LinkBeam_UnitStart_view", t("LinkBeam_UnitStart_tbl", "LBUS"))
}

fn link_beam_unit_end(schema: &DatabaseSchema) -> Result<ViewSchema, JoinError> {
    link_beam_unit(schema, "LinkBeam_UnitEnd_view", t("LinkBeam_UnitEnd_tbl", "LBUE"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cablelist::tables::TABLES;
    use crate::view::{JoinOperator, SelectItem};

    fn tables_only() -> DatabaseSchema {
        let mut schema = DatabaseSchema::new();
        for build in TABLES {
            schema.add_table(build());
        }
        schema
    }

    fn field_aliases(view: &ViewSchema) -> Vec<String> {
        view.select_items()
            .iter()
            .filter_map(|item| match item {
                SelectItem::Field(f) => Some(f.alias.clone().unwrap_or_else(|| f.field_name.clone())),
                SelectItem::Raw(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_every_view_builds_under_its_name() {
        let schema = tables_only();
        for (name, build) in VIEWS {
            let view = build(&schema).unwrap();
            assert_eq!(view.name, name);
            assert!(!view.select_items().is_empty());
            assert!(!view.join_clauses().is_empty());
        }
    }

    #[test]
    fn test_vehicle_type_unit_joins() {
        let view = vehicle_type_unit(&tables_only()).unwrap();
        let joins = view.join_clauses();
        assert_eq!(joins.len(), 3);
        assert_eq!(joins[0].joined_table.alias.as_deref(), Some("VT"));
        assert_eq!(joins[0].keys()[0].main_table_field, "VehicleType_Id_FK");
        assert_eq!(joins[0].keys()[0].joined_table_field, "Id_PK");
        assert_eq!(joins[1].keys()[0].main_table_field, "Unit_Id_FK");
        assert_eq!(joins[2].operator, JoinOperator::LeftJoin);
        assert_eq!(joins[2].keys()[0].main_table_field, "Article_Id_FK");
        assert_eq!(field_aliases(&view).len(), 16);
    }

    #[test]
    fn test_link_list_joins_vehicle_link_on_four_keys() {
        let view = link_list(&tables_only()).unwrap();
        let vtl = view
            .join_clauses()
            .iter()
            .find(|j| j.joined_table.table_name == "VehicleType_Link_tbl")
            .unwrap();
        assert_eq!(vtl.operator, JoinOperator::LeftJoin);
        let pairs: Vec<_> = vtl
            .keys()
            .iter()
            .map(|k| (k.main_table_field.as_str(), k.joined_table_field.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("UnitConnectionStart_Id_FK", "UnitConnectionStart_Id_FK"),
                ("UnitConnectionEnd_Id_FK", "UnitConnectionEnd_Id_FK"),
                ("Version_FK", "Link_Version_FK"),
                ("Modification_Code_FK", "Link_Modification_Code_FK"),
            ]
        );
    }

    #[test]
    fn test_link_views_share_columns() {
        let schema = tables_only();
        let unit_link = field_aliases(&unit_link(&schema).unwrap());
        let link_list = field_aliases(&link_list(&schema).unwrap());
        assert_eq!(unit_link.len(), 47);
        assert_eq!(link_list.len(), 49);
        assert_eq!(unit_link[6..], link_list[8..]);
        assert_eq!(link_list[0], "StartVehicleType_Id_PK");
        assert_eq!(unit_link[0], "Version");
    }

    #[test]
    fn test_article_link_columns() {
        let view = article_link(&tables_only()).unwrap();
        let names = field_aliases(&view);
        assert_eq!(names.len(), 28);
        assert_eq!(names[11], "StartArticle_Id_FK");
        assert_eq!(names[19], "LinkDirectionPictureAscii");
        assert_eq!(names[20], "EndArticle_Id_FK");
        assert_eq!(names[27], "EndFunctionIT");
    }

    #[test]
    fn test_missing_table_fails_inferred_join() {
        let err = unit_vehicle_type(&DatabaseSchema::new()).unwrap_err();
        assert_eq!(err, JoinError::TableNotFound("VehicleType_tbl".to_string()));
    }
}
