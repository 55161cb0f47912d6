use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::NationalityFile;

/// Emit the JSON Schema for `nationality.json`.
pub fn nationality_json_schema() -> RootSchema {
    schema_for!(NationalityFile)
}
