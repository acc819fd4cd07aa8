use super::{
    optional_code, quantity, Address, ComposeContext, Dimensions, DocumentComposer, DocumentKind,
    Section,
};
use crate::blocks::Field;
use crate::format::{yes_no, DateInput};
use serde::Deserialize;

fn default_currency() -> String {
    "EUR".to_string()
}

/// One end of a transport leg
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub address: Address,
    pub contact_person: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub loading_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CargoDetails {
    pub description: String,
    pub cargo_type: String,
    pub weight: Option<f64>,
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub value: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub packaging: String,
    pub quantity: u32,
    pub unit_type: String,
    pub fragile: Option<bool>,
    pub stackable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequirements {
    pub vehicle_type: String,
    pub capacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportationRequest {
    pub request_number: Option<String>,
    pub status: Option<String>,
    pub priority: String,
    pub service_type: String,
    pub pickup_location: Location,
    pub delivery_location: Location,
    pub cargo: CargoDetails,
    pub requested_pickup_date: DateInput,
    pub requested_delivery_date: Option<DateInput>,
    pub created_at: Option<DateInput>,
    pub vehicle_requirements: Option<VehicleRequirements>,
    pub special_instructions: Option<String>,
    #[serde(default)]
    pub requires_insurance: bool,
    #[serde(default)]
    pub requires_customs_clearance: bool,
    pub estimated_cost: Option<f64>,
    pub final_cost: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub tracking_number: Option<String>,
}

impl TransportationRequest {
    fn location_section(
        &self,
        ctx: &ComposeContext<'_>,
        title: &str,
        location: &Location,
        date: (&str, Option<&DateInput>),
        loading_label: &str,
    ) -> Section {
        let (date_label, date) = date;
        Section::new(title)
            .block(Field::new("Address", location.address.to_string()).stacked())
            .block(Field::new("Contact Person", location.contact_person.as_str()))
            .block(Field::new("Phone", location.contact_phone.as_str()))
            .block(Field::optional("Email", location.contact_email.as_deref()))
            .block(Field::optional(date_label, date.map(|d| ctx.date(Some(d)))))
            .block(optional_code(ctx, loading_label, location.loading_type.as_deref()))
    }

    fn cargo_section(&self, ctx: &ComposeContext<'_>) -> Section {
        let cargo = &self.cargo;
        Section::new("Cargo Information")
            .block(Field::new("Description", cargo.description.as_str()).stacked())
            .block(Field::new("Cargo Type", ctx.label(&cargo.cargo_type)))
            .block(Field::optional("Weight", cargo.weight.map(|w| format!("{w} kg"))))
            .block(Field::optional("Dimensions", cargo.dimensions.as_ref().map(|d| d.to_string())))
            .block(Field::new("Packaging", ctx.label(&cargo.packaging)))
            .block(Field::new("Quantity", quantity(cargo.quantity, &cargo.unit_type)))
            .block(Field::optional(
                "Estimated Value",
                (cargo.value > 0.0).then(|| ctx.money(cargo.value, &cargo.currency)),
            ))
            .block(Field::optional("Fragile", cargo.fragile.map(yes_no)))
            .block(Field::optional("Stackable", cargo.stackable.map(yes_no)))
    }
}

impl DocumentComposer for TransportationRequest {
    fn kind(&self) -> DocumentKind {
        DocumentKind::TransportationRequest
    }

    fn natural_id(&self) -> Option<String> {
        self.request_number.clone()
    }

    fn sections(&self, ctx: &ComposeContext<'_>) -> Vec<Section> {
        let request = Section::new("Request Information")
            .block(Field::optional("Request Number", self.request_number.as_deref()))
            .block(optional_code(ctx, "Status", self.status.as_deref()))
            .block(Field::new("Service Type", ctx.label(&self.service_type)))
            .block(Field::new("Priority", ctx.label(&self.priority)))
            .block(Field::optional(
                "Created",
                self.created_at.as_ref().map(|d| ctx.date(Some(d))),
            ));

        let pickup = self.location_section(
            ctx,
            "Pickup Location",
            &self.pickup_location,
            ("Requested Pickup Date", Some(&self.requested_pickup_date)),
            "Loading Type",
        );
        let delivery = self.location_section(
            ctx,
            "Delivery Location",
            &self.delivery_location,
            ("Requested Delivery Date", self.requested_delivery_date.as_ref()),
            "Unloading Type",
        );

        let vehicle = self.vehicle_requirements.as_ref();
        let service = Section::new("Service Requirements")
            .block(optional_code(ctx, "Vehicle Type", vehicle.map(|v| v.vehicle_type.as_str())))
            .block(Field::optional(
                "Vehicle Capacity",
                vehicle.and_then(|v| v.capacity).map(|c| format!("{c} kg")),
            ))
            .block(Field::new("Requires Insurance", yes_no(self.requires_insurance)))
            .block(Field::new(
                "Requires Customs Clearance",
                yes_no(self.requires_customs_clearance),
            ))
            .block(
                Field::optional("Special Instructions", self.special_instructions.as_deref())
                    .stacked(),
            )
            .block(Field::optional("Tracking Number", self.tracking_number.as_deref()));

        let pricing = Section::new("Pricing")
            .block(Field::optional(
                "Estimated Cost",
                self.estimated_cost.map(|c| ctx.money(c, &self.currency)),
            ))
            .block(
                Field::optional("Final Cost", self.final_cost.map(|c| ctx.money(c, &self.currency)))
                    .strong(),
            );

        vec![
            request,
            pickup,
            delivery,
            self.cargo_section(ctx),
            service,
            pricing,
        ]
    }
}
