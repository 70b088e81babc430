/// Arrow schema definitions for electric vehicle registration data.
pub mod ev {
    use arrow::datatypes::{DataType, Field, Schema};

    use crate::layout::RecordField;

    /// Schema for the tabulated registration table.
    ///
    /// Column order follows [`VehicleRecord`](crate::VehicleRecord) field order.
    pub fn registration_schema() -> Schema {
        Schema::new(vec![
            Field::new(RecordField::Vin.name(), DataType::Utf8, false),
            Field::new(RecordField::County.name(), DataType::Utf8, false),
            Field::new(RecordField::City.name(), DataType::Utf8, false),
            Field::new(RecordField::State.name(), DataType::Utf8, false),
            Field::new(RecordField::PostalCode.name(), DataType::Int64, false),
            Field::new(RecordField::ModelYear.name(), DataType::Int64, false),
            Field::new(RecordField::Make.name(), DataType::Utf8, false),
            Field::new(RecordField::Model.name(), DataType::Utf8, false),
            Field::new(RecordField::ElectricVehicleType.name(), DataType::Utf8, false),
            Field::new(RecordField::CleanFuelEligibility.name(), DataType::Boolean, false),
            Field::new(RecordField::ElectricRange.name(), DataType::Int64, false),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::ev;
    use arrow::datatypes::DataType;

    #[test]
    fn registration_schema_has_expected_fields() {
        let schema = ev::registration_schema();
        assert_eq!(schema.fields().len(), 11);
        assert!(schema.field_with_name("vin").is_ok());
        assert!(schema.field_with_name("clean_fuel_eligible").is_ok());
    }

    #[test]
    fn registration_schema_column_order() {
        let schema = ev::registration_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            [
                "vin",
                "county",
                "city",
                "state",
                "postal_code",
                "model_year",
                "make",
                "model",
                "electric_vehicle_type",
                "clean_fuel_eligible",
                "electric_range",
            ]
        );
    }

    #[test]
    fn numeric_columns_are_int64() {
        let schema = ev::registration_schema();
        for name in ["postal_code", "model_year", "electric_range"] {
            let field = schema.field_with_name(name).unwrap();
            assert_eq!(field.data_type(), &DataType::Int64, "{name}");
            assert!(!field.is_nullable());
        }
    }
}
