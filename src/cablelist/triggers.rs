use crate::trigger::{TriggerEvent, TriggerSchema};

/// Copy the links of the latest version into a newly inserted version,
/// marked `EXISTS`, leaving out removed ones.
const LINK_VERSION_AFTER_INSERT: &str = " INSERT INTO Link_tbl (UnitConnectionStart_Id_FK, \
UnitConnectionEnd_Id_FK, Version_FK, Modification_Code_FK, \
LinkType_Code_FK, LinkDirection_Code_FK, ArticleConnectionStart_Id_FK, ArticleConnectionEnd_Id_FK, \
Wire_Id_FK, LinkBeam_Id_FK, Identification, Resistance, Length, Remarks)
  SELECT DISTINCT L.UnitConnectionStart_Id_FK, L.UnitConnectionEnd_Id_FK, NEW.Version_PK, 'EXISTS', \
L.LinkType_Code_FK, L.LinkDirection_Code_FK, L.ArticleConnectionStart_Id_FK, L.ArticleConnectionEnd_Id_FK, \
L.Wire_Id_FK, L.LinkBeam_Id_FK, L.Identification, L.Resistance, L.Length, L.Remarks
   FROM Link_tbl L
  WHERE L.Version_FK = (SELECT max(Version_FK) FROM Link_tbl)
  AND (L.Modification_Code_FK NOT IN ('REM') OR L.Modification_Code_FK IS NULL);
";

pub(super) fn on_link_version_after_insert() -> TriggerSchema {
    TriggerSchema::new(
        "onLinkVersionAfterInsert",
        TriggerEvent::AfterInsert,
        "LinkVersion_tbl",
        LINK_VERSION_AFTER_INSERT,
    )
}
