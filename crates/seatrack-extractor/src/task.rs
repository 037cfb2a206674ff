//! Agent task instructions for a tracking lookup

use serde::{Deserialize, Serialize};
use seatrack_domain::NOT_AVAILABLE;

/// Tracking portal the agent is sent to
pub const DEFAULT_SITE_URL: &str = "http://www.seacargotracking.net/";

/// Carrier selected on the tracking portal
pub const DEFAULT_CARRIER: &str = "HMM (Hyundai Merchant Marine)";

/// Shape the agent is asked to answer in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnSchema {
    /// Flat object with the four record fields
    Flat,
    /// `{"vessel_voyage": [...]}` list of entries
    #[default]
    VoyageList,
}

/// Builds the natural-language task handed to the browser agent
pub struct TaskBuilder {
    booking_id: String,
    site_url: String,
    carrier: String,
    schema: ReturnSchema,
    prior_run: bool,
}

impl TaskBuilder {
    /// Create a task builder for a booking id
    pub fn new(booking_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
            site_url: DEFAULT_SITE_URL.to_string(),
            carrier: DEFAULT_CARRIER.to_string(),
            schema: ReturnSchema::default(),
            prior_run: false,
        }
    }

    /// Override the tracking portal URL
    pub fn site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Override the carrier to select
    pub fn carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = carrier.into();
        self
    }

    /// Choose the answer shape
    pub fn schema(mut self, schema: ReturnSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Mention that an earlier lookup succeeded and the site may have changed
    pub fn with_prior_run(mut self, prior_run: bool) -> Self {
        self.prior_run = prior_run;
        self
    }

    /// Build the complete task text
    pub fn build(&self) -> String {
        let mut task = String::new();

        // 1. Goal
        if self.prior_run {
            task.push_str(&format!(
                "Using the previous successful lookup on {}, retrieve the vessel, voyage number and arrival date for booking ID '{}'.\n\n",
                self.site_url, self.booking_id
            ));
        } else {
            task.push_str(&format!(
                "Track the shipping container with booking ID '{}':\n\n",
                self.booking_id
            ));
        }

        // 2. Navigation steps
        task.push_str(&format!("1. Go to {}\n", self.site_url));
        task.push_str(&format!(
            "2. Look for {} or the closest matching carrier option\n",
            self.carrier
        ));
        task.push_str("3. Open Track & Trace:\n");
        task.push_str("    - Enter the booking ID in the search or B/L No. field\n");
        task.push_str("    - Click the Search button\n");
        task.push_str("4. Read the full result page and extract:\n");
        task.push_str("    - Vessel name and voyage number (vessel column format: NAME 0000W)\n");
        task.push_str("    - Arrival date and time from ETB (Estimated Time of Berthing)\n\n");

        // 3. Return schema
        task.push_str(&self.schema_instructions());

        if self.prior_run {
            task.push_str("\n\nIf the website structure has changed, adapt your approach accordingly.");
        }

        task
    }

    fn schema_instructions(&self) -> String {
        match self.schema {
            ReturnSchema::Flat => format!(
                r#"Return ONLY a JSON object:
{{
    "booking_id": "{id}",
    "vessel_name": "vessel name or '{na}'",
    "voyage_number": "voyage number or '{na}'",
    "arrival_date": "YYYY-MM-DD HH:MM or '{na}'"
}}
If any information cannot be found, set the value to "{na}"."#,
                id = self.booking_id,
                na = NOT_AVAILABLE
            ),
            ReturnSchema::VoyageList => format!(
                r#"Return ONLY a JSON object:
{{
    "vessel_voyage": [
        {{
            "vessel_name": "vessel name",
            "voyage_number": "voyage number",
            "arrival_date_time": "YYYY-MM-DD HH:MM"
        }}
    ]
}}
If any information cannot be found, set the value to "{na}"."#,
                na = NOT_AVAILABLE
            ),
        }
    }
}
