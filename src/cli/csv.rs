use commonwebacl::{Result, WebAcl};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Save Assembled Rules to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(web_acl: &WebAcl, path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize(["Priority", "Rule", "Action", "Condition", "Scope"])?;

    // Write rule records
    for rule in web_acl.rule_set().rules() {
        let record = (
            rule.priority(),
            rule.name(web_acl.id()),
            rule.action().to_string(),
            rule.statement().to_string(),
            web_acl.scope().to_string(),
        );
        writer.serialize(record)?;
    }

    writer.flush()?;

    Ok(())
}
