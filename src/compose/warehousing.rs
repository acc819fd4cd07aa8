use super::{optional_code, quantity, ComposeContext, DocumentComposer, DocumentKind, Section};
use crate::blocks::Field;
use crate::format::{yes_no, DateInput};
use serde::Deserialize;

const NO_DESCRIPTION: &str = "No description provided";

fn default_currency() -> String {
    "EUR".to_string()
}

/// `{ "value": 6, "unit": "months" }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StorageDuration {
    pub value: u32,
    pub unit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredCargo {
    pub description: Option<String>,
    pub cargo_type: String,
    pub packaging: String,
    pub quantity: u32,
    pub unit_type: String,
    pub value: f64,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehousingRequest {
    pub request_number: Option<String>,
    pub status: Option<String>,
    pub priority: String,
    pub storage_type: String,
    pub security_level: String,
    pub estimated_volume: f64,
    pub estimated_weight: f64,
    pub estimated_storage_duration: Option<StorageDuration>,
    pub storage_location: Option<String>,
    pub billing_type: String,
    pub planned_start_date: DateInput,
    pub planned_end_date: Option<DateInput>,
    pub created_at: Option<DateInput>,
    #[serde(default)]
    pub handling_services: Vec<String>,
    #[serde(default)]
    pub value_added_services: Vec<String>,
    #[serde(default)]
    pub requires_temperature_control: bool,
    #[serde(default)]
    pub requires_humidity_control: bool,
    #[serde(default)]
    pub requires_special_handling: bool,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub cargo: StoredCargo,
    pub estimated_cost: Option<f64>,
    pub final_cost: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Display names of `codes`, comma separated; `None` when there are none
fn service_list(ctx: &ComposeContext<'_>, codes: &[String]) -> Option<String> {
    if codes.is_empty() {
        return None;
    }
    Some(
        codes
            .iter()
            .map(|code| ctx.label(code))
            .collect::<Vec<String>>()
            .join(", "),
    )
}

impl DocumentComposer for WarehousingRequest {
    fn kind(&self) -> DocumentKind {
        DocumentKind::WarehousingRequest
    }

    fn natural_id(&self) -> Option<String> {
        self.request_number.clone()
    }

    fn sections(&self, ctx: &ComposeContext<'_>) -> Vec<Section> {
        let request = Section::new("Request Information")
            .block(Field::optional("Request Number", self.request_number.as_deref()))
            .block(optional_code(ctx, "Status", self.status.as_deref()))
            .block(Field::new("Storage Type", ctx.label(&self.storage_type)))
            .block(Field::new("Priority", ctx.label(&self.priority)))
            .block(Field::optional(
                "Created",
                self.created_at.as_ref().map(|d| ctx.date(Some(d))),
            ));

        let storage = Section::new("Storage Information")
            .block(Field::new(
                "Estimated Volume",
                format!("{} m³", self.estimated_volume),
            ))
            .block(Field::new(
                "Estimated Weight",
                format!("{} kg", self.estimated_weight),
            ))
            .block(Field::new("Security Level", ctx.label(&self.security_level)))
            .block(Field::optional("Storage Location", self.storage_location.as_deref()))
            .block(Field::new("Planned Start Date", ctx.date(Some(&self.planned_start_date))))
            .block(Field::optional(
                "Planned End Date",
                self.planned_end_date.as_ref().map(|d| ctx.date(Some(d))),
            ))
            .block(Field::optional(
                "Storage Duration",
                self.estimated_storage_duration
                    .as_ref()
                    .map(|d| format!("{} {}", d.value, d.unit)),
            ))
            .block(Field::new("Billing Type", ctx.label(&self.billing_type)));

        let cargo = &self.cargo;
        let description = cargo
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION);
        let cargo_currency = cargo.currency.as_deref().unwrap_or(self.currency.as_str());
        let cargo_section = Section::new("Cargo Information")
            .block(Field::new("Description", description).stacked())
            .block(Field::new("Cargo Type", ctx.label(&cargo.cargo_type)))
            .block(Field::new("Packaging", ctx.label(&cargo.packaging)))
            .block(Field::new("Quantity", quantity(cargo.quantity, &cargo.unit_type)))
            .block(Field::optional(
                "Estimated Value",
                (cargo.value > 0.0).then(|| ctx.money(cargo.value, cargo_currency)),
            ));

        let services = Section::new("Service Requirements")
            .block(Field::optional(
                "Handling Services",
                service_list(ctx, &self.handling_services),
            ))
            .block(Field::optional(
                "Value Added Services",
                service_list(ctx, &self.value_added_services),
            ))
            .block(Field::new(
                "Requires Temperature Control",
                yes_no(self.requires_temperature_control),
            ))
            .block(Field::new(
                "Requires Humidity Control",
                yes_no(self.requires_humidity_control),
            ))
            .block(Field::new(
                "Requires Special Handling",
                yes_no(self.requires_special_handling),
            ))
            .block(
                Field::optional("Special Instructions", self.special_instructions.as_deref())
                    .stacked(),
            );

        let pricing = Section::new("Pricing")
            .block(Field::optional(
                "Estimated Cost",
                self.estimated_cost.map(|c| ctx.money(c, &self.currency)),
            ))
            .block(
                Field::optional("Final Cost", self.final_cost.map(|c| ctx.money(c, &self.currency)))
                    .strong(),
            );

        vec![request, storage, cargo_section, services, pricing]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Block;
    use crate::config::TableWidths;
    use crate::format::{LabelCatalog, Locale};

    fn request() -> WarehousingRequest {
        serde_json::from_str(
            r#"{
                "priority": "NORMAL",
                "storageType": "COLD_STORAGE",
                "securityLevel": "HIGH_SECURITY",
                "estimatedVolume": 45.5,
                "estimatedWeight": 3000,
                "billingType": "MONTHLY",
                "plannedStartDate": "2024-06-01",
                "handlingServices": ["LOADING", "PALLETIZING"],
                "valueAddedServices": [],
                "requiresTemperatureControl": true,
                "cargo": { "cargoType": "PERISHABLE", "packaging": "BOXES", "quantity": 120, "unitType": "boxes", "value": 5400, "currency": "EUR" }
            }"#,
        )
        .expect("valid request")
    }

    fn field(sections: &[Section], label: &str) -> Option<String> {
        sections.iter().flat_map(|s| s.blocks.iter()).find_map(|block| match block {
            Block::Field(field) if field.label == label && !field.is_skipped() => {
                field.value.clone()
            }
            _ => None,
        })
    }

    #[test]
    fn fills_in_defaults_and_skips_absent_values() {
        let request = request();
        let (locale, labels, tables) = (Locale::default(), LabelCatalog::default(), TableWidths::default());
        let ctx = ComposeContext {
            locale: &locale,
            labels: &labels,
            tables: &tables,
            content_width: crate::units::mm(170.0),
        };
        let sections = request.sections(&ctx);
        assert_eq!(sections.len(), 5);
        assert_eq!(field(&sections, "Description").as_deref(), Some(NO_DESCRIPTION));
        assert_eq!(
            field(&sections, "Handling Services").as_deref(),
            Some("Loading, Palletizing")
        );
        assert_eq!(field(&sections, "Value Added Services"), None);
        assert_eq!(field(&sections, "Storage Duration"), None);
        assert_eq!(field(&sections, "Estimated Volume").as_deref(), Some("45.5 m³"));
        assert_eq!(field(&sections, "Estimated Value").as_deref(), Some("€5,400.00"));
        assert_eq!(field(&sections, "Security Level").as_deref(), Some("High Security"));
        assert_eq!(field(&sections, "Requires Temperature Control").as_deref(), Some("Yes"));
        assert_eq!(field(&sections, "Requires Humidity Control").as_deref(), Some("No"));
        assert!(!sections[4].has_content());
        assert_eq!(request.natural_id(), None);
    }
}
