//! Schema registry for the `sales` entity.
//!
//! [`SCHEMA`] is the single declaration of the client-visible fields: their
//! wire name, value kind, whether they are required and their default. Every
//! other part of the engine goes through it instead of naming fields itself:
//!
//! - filters and patches are whitelisted with [`Field::parse`];
//! - values are read with [`Field::read`] and written with [`Field::assign`];
//! - records are projected to field maps with [`project`].
//!
//! The storage-generated `id` is not part of the schema. It only shows up in a
//! projection when explicitly asked for with [`Projection::WithId`].

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue};
use serde_json::{Map, Value};

use crate::{EngineError, Record, ResultEngine, sales, util};

/// A client field map: wire field name to JSON value.
pub type FieldMap = Map<String, Value>;

/// Maximum length, in characters, of the bounded text fields.
pub const TEXT_MAX_LEN: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Date,
    FieldOfActivity,
    DoctorName,
    Country,
    State,
    Application,
    ProductName,
    Sales,
    Quantity,
    Discount,
    Profit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Timestamp,
    Text,
    Float,
    Integer,
}

/// Value a field takes on insert when the payload does not carry it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDefault {
    /// The insert time.
    Now,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub field: Field,
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<FieldDefault>,
    pub max_len: Option<usize>,
}

const fn descriptor(
    field: Field,
    name: &'static str,
    kind: FieldKind,
    required: bool,
) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        kind,
        required,
        default: None,
        max_len: None,
    }
}

const fn bounded_text(field: Field, name: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        max_len: Some(TEXT_MAX_LEN),
        ..descriptor(field, name, FieldKind::Text, true)
    }
}

/// The ordered field table. Entries follow the declaration order of [`Field`].
pub static SCHEMA: [FieldDescriptor; 11] = [
    FieldDescriptor {
        default: Some(FieldDefault::Now),
        ..descriptor(Field::Date, "date", FieldKind::Timestamp, false)
    },
    descriptor(Field::FieldOfActivity, "fieldOfActivity", FieldKind::Text, false),
    bounded_text(Field::DoctorName, "doctorName"),
    bounded_text(Field::Country, "country"),
    bounded_text(Field::State, "state"),
    bounded_text(Field::Application, "application"),
    bounded_text(Field::ProductName, "productName"),
    descriptor(Field::Sales, "sales", FieldKind::Float, true),
    descriptor(Field::Quantity, "quantity", FieldKind::Integer, false),
    descriptor(Field::Discount, "discount", FieldKind::Float, false),
    descriptor(Field::Profit, "profit", FieldKind::Float, true),
];

/// Wire name of the storage-generated identifier.
pub const ID_FIELD: &str = "id";

/// The ordered list of client-visible field names.
pub fn fields() -> impl ExactSizeIterator<Item = &'static str> + Clone {
    SCHEMA.iter().map(|descriptor| descriptor.name)
}

/// Which keys a projected record carries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    /// Exactly the schema fields.
    #[default]
    Fields,
    /// `id` first, then the schema fields.
    WithId,
}

/// Project a record to a field map, keys in schema order.
pub fn project(record: &Record, projection: Projection) -> FieldMap {
    let mut map = FieldMap::new();
    if projection == Projection::WithId {
        map.insert(ID_FIELD.to_string(), Value::from(record.id));
    }
    for descriptor in &SCHEMA {
        map.insert(
            descriptor.name.to_string(),
            descriptor.field.read(record),
        );
    }
    map
}

/// Keep only the keys the schema declares, dropping everything else.
pub(crate) fn whitelist(map: &FieldMap) -> impl Iterator<Item = (Field, &Value)> {
    map.iter()
        .filter_map(|(key, value)| Field::parse(key).map(|field| (field, value)))
}

/// Build an insertable model from a client payload.
///
/// Unknown keys are dropped, absent fields take their default, and a required
/// field left unset is a validation error.
pub(crate) fn active_model(payload: &FieldMap) -> ResultEngine<sales::ActiveModel> {
    let mut model = <sales::ActiveModel as Default>::default();
    for (field, value) in whitelist(payload) {
        // `null` on a defaulted field means "take the default".
        if value.is_null() && field.descriptor().default.is_some() {
            continue;
        }
        field.assign(&mut model, value)?;
    }

    for descriptor in &SCHEMA {
        let column = descriptor.field.column();
        if !model.is_not_set(column) {
            continue;
        }
        match descriptor.default {
            Some(FieldDefault::Now) => descriptor
                .field
                .assign(&mut model, &Value::from(Utc::now().to_rfc3339()))?,
            None if descriptor.required => {
                return Err(EngineError::Validation(format!(
                    "{} is required",
                    descriptor.name
                )));
            }
            None => {}
        }
    }

    Ok(model)
}

/// Build a partial model holding only the patched fields.
///
/// Returns `None` when the patch carries no field of the schema.
pub(crate) fn patch_model(patch: &FieldMap) -> ResultEngine<Option<sales::ActiveModel>> {
    let mut model = <sales::ActiveModel as Default>::default();
    let mut touched = false;
    for (field, value) in whitelist(patch) {
        field.assign(&mut model, value)?;
        touched = true;
    }
    Ok(touched.then_some(model))
}

impl Field {
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &SCHEMA[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Resolve a wire name. Names are case-sensitive.
    pub fn parse(name: &str) -> Option<Self> {
        let field = match name {
            "date" => Field::Date,
            "fieldOfActivity" => Field::FieldOfActivity,
            "doctorName" => Field::DoctorName,
            "country" => Field::Country,
            "state" => Field::State,
            "application" => Field::Application,
            "productName" => Field::ProductName,
            "sales" => Field::Sales,
            "quantity" => Field::Quantity,
            "discount" => Field::Discount,
            "profit" => Field::Profit,
            _ => return None,
        };
        Some(field)
    }

    pub fn column(self) -> sales::Column {
        match self {
            Field::Date => sales::Column::Date,
            Field::FieldOfActivity => sales::Column::FieldOfActivity,
            Field::DoctorName => sales::Column::DoctorName,
            Field::Country => sales::Column::Country,
            Field::State => sales::Column::State,
            Field::Application => sales::Column::Application,
            Field::ProductName => sales::Column::ProductName,
            Field::Sales => sales::Column::Sales,
            Field::Quantity => sales::Column::Quantity,
            Field::Discount => sales::Column::Discount,
            Field::Profit => sales::Column::Profit,
        }
    }

    /// Read the field from a record as a JSON value. Unset optionals are `null`.
    pub fn read(self, record: &Record) -> Value {
        match self {
            Field::Date => Value::from(record.date.to_rfc3339()),
            Field::FieldOfActivity => Value::from(record.field_of_activity.clone()),
            Field::DoctorName => Value::from(record.doctor_name.clone()),
            Field::Country => Value::from(record.country.clone()),
            Field::State => Value::from(record.state.clone()),
            Field::Application => Value::from(record.application.clone()),
            Field::ProductName => Value::from(record.product_name.clone()),
            Field::Sales => Value::from(record.sales),
            Field::Quantity => Value::from(record.quantity),
            Field::Discount => Value::from(record.discount),
            Field::Profit => Value::from(record.profit),
        }
    }

    /// Decode `raw` and set it on `model`.
    pub fn assign(self, model: &mut sales::ActiveModel, raw: &Value) -> ResultEngine<()> {
        let name = self.name();
        match self {
            Field::Date => model.date = ActiveValue::Set(self.required(util::timestamp(name, raw)?)?),
            Field::FieldOfActivity => {
                model.field_of_activity = ActiveValue::Set(util::text(name, raw)?)
            }
            Field::DoctorName => model.doctor_name = ActiveValue::Set(self.bounded_text(raw)?),
            Field::Country => model.country = ActiveValue::Set(self.bounded_text(raw)?),
            Field::State => model.state = ActiveValue::Set(self.bounded_text(raw)?),
            Field::Application => model.application = ActiveValue::Set(self.bounded_text(raw)?),
            Field::ProductName => model.product_name = ActiveValue::Set(self.bounded_text(raw)?),
            Field::Sales => model.sales = ActiveValue::Set(self.required(util::float(name, raw)?)?),
            Field::Quantity => model.quantity = ActiveValue::Set(self.quantity(raw)?),
            Field::Discount => model.discount = ActiveValue::Set(util::float(name, raw)?),
            Field::Profit => model.profit = ActiveValue::Set(self.required(util::float(name, raw)?)?),
        }
        Ok(())
    }

    fn required<T>(self, value: Option<T>) -> ResultEngine<T> {
        value.ok_or_else(|| EngineError::Validation(format!("{} must not be null", self.name())))
    }

    fn bounded_text(self, raw: &Value) -> ResultEngine<String> {
        let value = self.required(util::text(self.name(), raw)?)?;
        if value.trim().is_empty() {
            return Err(EngineError::Validation(format!(
                "{} must not be empty",
                self.name()
            )));
        }
        if let Some(max_len) = self.descriptor().max_len
            && value.chars().count() > max_len
        {
            return Err(EngineError::Validation(format!(
                "{} must be at most {max_len} characters",
                self.name()
            )));
        }
        Ok(value)
    }

    fn quantity(self, raw: &Value) -> ResultEngine<Option<i32>> {
        let Some(value) = util::integer(self.name(), raw)? else {
            return Ok(None);
        };
        if value < 0 {
            return Err(EngineError::Validation(format!(
                "{} must be >= 0",
                self.name()
            )));
        }
        i32::try_from(value).map(Some).map_err(|_| {
            EngineError::Validation(format!("{} is out of range", self.name()))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    const ALL_FIELDS: [Field; 11] = [
        Field::Date,
        Field::FieldOfActivity,
        Field::DoctorName,
        Field::Country,
        Field::State,
        Field::Application,
        Field::ProductName,
        Field::Sales,
        Field::Quantity,
        Field::Discount,
        Field::Profit,
    ];

    fn payload() -> FieldMap {
        json!({
            "doctorName": "Dr. Rossi",
            "country": "Italy",
            "state": "Veneto",
            "application": "Dental",
            "productName": "Implant",
            "sales": 120.5,
            "profit": 30.0,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    fn record() -> Record {
        Record {
            id: 7,
            date: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            field_of_activity: None,
            doctor_name: "Dr. Rossi".to_string(),
            country: "Italy".to_string(),
            state: "Veneto".to_string(),
            application: "Dental".to_string(),
            product_name: "Implant".to_string(),
            sales: 120.5,
            quantity: Some(3),
            discount: None,
            profit: 30.0,
        }
    }

    #[test]
    fn schema_table_follows_field_order() {
        for (index, field) in ALL_FIELDS.iter().enumerate() {
            assert_eq!(SCHEMA[index].field, *field);
            assert_eq!(Field::parse(field.name()), Some(*field));
        }
    }

    #[test]
    fn fields_exclude_id() {
        let names: Vec<_> = fields().collect();
        assert_eq!(names.len(), 11);
        assert_eq!(names[0], "date");
        assert_eq!(names[10], "profit");
        assert!(!names.contains(&ID_FIELD));
    }

    #[test]
    fn parse_is_case_sensitive_and_rejects_id() {
        assert_eq!(Field::parse("doctorName"), Some(Field::DoctorName));
        assert_eq!(Field::parse("DoctorName"), None);
        assert_eq!(Field::parse("id"), None);
    }

    #[test]
    fn projection_keys_match_schema() {
        let map = project(&record(), Projection::Fields);
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, fields().collect::<Vec<_>>());
        assert_eq!(map["fieldOfActivity"], Value::Null);
        assert_eq!(map["quantity"], json!(3));

        let with_id = project(&record(), Projection::WithId);
        assert_eq!(with_id.keys().next().map(String::as_str), Some("id"));
        assert_eq!(with_id["id"], json!(7));
        assert_eq!(with_id.len(), 12);
    }

    #[test]
    fn active_model_fills_date_and_drops_unknown_keys() {
        let mut payload = payload();
        payload.insert("id".to_string(), json!(99));
        payload.insert("unknown".to_string(), json!("x"));

        let model = active_model(&payload).unwrap();
        assert!(model.id.is_not_set());
        assert!(model.date.is_set());
        assert!(model.field_of_activity.is_not_set());
    }

    #[test]
    fn active_model_treats_null_date_as_unset() {
        let mut payload = payload();
        payload.insert("date".to_string(), Value::Null);

        let model = active_model(&payload).unwrap();
        assert!(model.date.is_set());
    }

    #[test]
    fn patch_model_rejects_null_date() {
        let patch = json!({ "date": null }).as_object().cloned().unwrap();
        assert_eq!(
            patch_model(&patch).unwrap_err(),
            EngineError::Validation("date must not be null".to_string())
        );
    }

    #[test]
    fn active_model_requires_required_fields() {
        let mut payload = payload();
        payload.remove("profit");
        assert_eq!(
            active_model(&payload).unwrap_err(),
            EngineError::Validation("profit is required".to_string())
        );
    }

    #[test]
    fn assign_validates_text_bounds_and_quantity_sign() {
        let mut model = <sales::ActiveModel as Default>::default();
        assert!(Field::DoctorName.assign(&mut model, &json!("  ")).is_err());
        assert!(Field::DoctorName
            .assign(&mut model, &json!("x".repeat(TEXT_MAX_LEN + 1)))
            .is_err());
        assert!(Field::DoctorName
            .assign(&mut model, &json!("x".repeat(TEXT_MAX_LEN)))
            .is_ok());
        assert!(Field::Quantity.assign(&mut model, &json!(-1)).is_err());
        assert!(Field::Quantity.assign(&mut model, &Value::Null).is_ok());
        assert!(Field::Sales.assign(&mut model, &Value::Null).is_err());
    }

    #[test]
    fn patch_model_without_schema_keys_is_none() {
        let patch = json!({ "id": 1, "bogus": true }).as_object().cloned().unwrap();
        assert!(patch_model(&patch).unwrap().is_none());

        let patch = json!({ "doctorName": "Dr. Bianchi" })
            .as_object()
            .cloned()
            .unwrap();
        let model = patch_model(&patch).unwrap().unwrap();
        assert!(model.doctor_name.is_set());
        assert!(model.sales.is_not_set());
    }
}
