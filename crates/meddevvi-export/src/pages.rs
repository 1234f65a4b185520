use serde::Serialize;
use tera::{Context, Tera};

use meddevvi_core::DISCLAIMER;
use meddevvi_core::models::facility::FacilityProfile;
use meddevvi_core::models::patient::PatientCase;
use meddevvi_core::models::resource::{Resource, ResourceCategory};
use meddevvi_engine::capability::FacilityCapabilitySet;
use meddevvi_engine::compose::{ClinicianReport, StudentReport, TriageResult};

use crate::error::ExportError;

const TEMPLATES: [(&str, &str); 7] = [
    ("base.html", include_str!("../templates/base.html.tera")),
    ("patient_form.html", include_str!("../templates/patient_form.html.tera")),
    ("index.html", include_str!("../templates/index.html.tera")),
    ("student.html", include_str!("../templates/student.html.tera")),
    ("clinician.html", include_str!("../templates/clinician.html.tera")),
    ("peripheral.html", include_str!("../templates/peripheral.html.tera")),
    ("peripheral_setup.html", include_str!("../templates/peripheral_setup.html.tera")),
];

/// Blank medication rows offered below the stored ones on the setup form.
const BLANK_MEDICATION_ROWS: usize = 3;

/// Compiled page templates. Build once and share.
#[derive(Debug)]
pub struct Pages {
    tera: Tera,
}

/// Form field values, echoed back after a submit.
#[derive(Debug, Default, Serialize)]
struct PatientForm {
    age: String,
    sex: String,
    chief_complaint: String,
    symptom_duration: String,
    symptoms: String,
    temperature: String,
    pulse: String,
    blood_pressure: String,
    respiratory_rate: String,
    oxygen_saturation: String,
    lab_values: String,
    comorbidities: String,
}

impl From<Option<&PatientCase>> for PatientForm {
    fn from(case: Option<&PatientCase>) -> Self {
        let Some(case) = case else {
            return Self::default();
        };
        Self {
            age: case.age.to_string(),
            sex: case.sex.clone(),
            chief_complaint: case.chief_complaint.clone(),
            symptom_duration: case.symptom_duration.clone(),
            symptoms: case.symptoms.clone(),
            temperature: case.temperature.clone(),
            pulse: case.pulse.clone(),
            blood_pressure: case.blood_pressure.clone(),
            respiratory_rate: case.respiratory_rate.clone(),
            oxygen_saturation: case.oxygen_saturation.clone(),
            lab_values: case.lab_values.clone(),
            comorbidities: case.comorbidities.clone(),
        }
    }
}

#[derive(Serialize)]
struct ReportPage<'a, R> {
    disclaimer: &'static str,
    form: PatientForm,
    report: Option<&'a R>,
}

#[derive(Serialize)]
struct Labelled {
    id: &'static str,
    label: &'static str,
}

impl From<&Resource> for Labelled {
    fn from(resource: &Resource) -> Self {
        Self {
            id: resource.as_str(),
            label: resource.label(),
        }
    }
}

#[derive(Serialize)]
struct PeripheralPage<'a> {
    disclaimer: &'static str,
    facility_name: &'a str,
    available: Vec<Labelled>,
    in_stock: Vec<String>,
    form: PatientForm,
    result: Option<&'a TriageResult>,
    required: Vec<Labelled>,
    missing: Vec<Labelled>,
}

#[derive(Serialize)]
struct Checkbox {
    name: &'static str,
    label: &'static str,
    checked: bool,
}

#[derive(Serialize)]
struct CheckboxGroup {
    title: &'static str,
    items: Vec<Checkbox>,
}

#[derive(Serialize)]
struct MedicationRow {
    drug_name: String,
    in_stock: bool,
}

#[derive(Serialize)]
struct SetupPage {
    disclaimer: &'static str,
    existing: bool,
    centre_name: String,
    groups: Vec<CheckboxGroup>,
    medications: Vec<MedicationRow>,
}

impl Pages {
    pub fn new() -> Result<Self, ExportError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())
            .map_err(|e| ExportError::TemplateParse(e.to_string()))?;
        Ok(Self { tera })
    }

    pub fn index(&self) -> Result<String, ExportError> {
        let mut context = Context::new();
        context.insert("disclaimer", DISCLAIMER);
        self.render("index.html", &context)
    }

    pub fn student(
        &self,
        patient: Option<&PatientCase>,
        report: Option<&StudentReport>,
    ) -> Result<String, ExportError> {
        self.render_report("student.html", patient, report)
    }

    pub fn clinician(
        &self,
        patient: Option<&PatientCase>,
        report: Option<&ClinicianReport>,
    ) -> Result<String, ExportError> {
        self.render_report("clinician.html", patient, report)
    }

    /// The peripheral triage form, with the result when a case was submitted.
    pub fn peripheral(
        &self,
        facility: &FacilityProfile,
        patient: Option<&PatientCase>,
        result: Option<&TriageResult>,
    ) -> Result<String, ExportError> {
        let capabilities = FacilityCapabilitySet::from_profile(facility);
        let page = PeripheralPage {
            disclaimer: DISCLAIMER,
            facility_name: &facility.name,
            available: facility.available_resources().iter().map(Labelled::from).collect(),
            in_stock: capabilities.medications().map(String::from).collect(),
            form: patient.into(),
            result,
            required: result
                .map(|r| r.required_resources.iter().map(Labelled::from).collect())
                .unwrap_or_default(),
            missing: result
                .map(|r| r.missing_resources.iter().map(Labelled::from).collect())
                .unwrap_or_default(),
        };
        self.render("peripheral.html", &context(&page)?)
    }

    /// The facility setup form, prefilled from the stored profile if any.
    pub fn setup(&self, facility: Option<&FacilityProfile>) -> Result<String, ExportError> {
        let groups = [
            ("Infrastructure", ResourceCategory::Infrastructure),
            ("Diagnostics", ResourceCategory::Diagnostic),
            ("Staff competencies", ResourceCategory::Competency),
        ]
        .into_iter()
        .map(|(title, category)| CheckboxGroup {
            title,
            items: Resource::all()
                .filter(|r| r.category() == category)
                .map(|r| Checkbox {
                    name: r.as_str(),
                    label: r.label(),
                    checked: facility.is_some_and(|f| f.has_resource(r)),
                })
                .collect(),
        })
        .collect();

        let mut medications: Vec<MedicationRow> = facility
            .map(|f| {
                f.medications
                    .iter()
                    .map(|m| MedicationRow {
                        drug_name: m.drug_name.clone(),
                        in_stock: m.in_stock,
                    })
                    .collect()
            })
            .unwrap_or_default();
        medications.extend((0..BLANK_MEDICATION_ROWS).map(|_| MedicationRow {
            drug_name: String::new(),
            in_stock: false,
        }));

        let page = SetupPage {
            disclaimer: DISCLAIMER,
            existing: facility.is_some(),
            centre_name: facility.map(|f| f.name.clone()).unwrap_or_default(),
            groups,
            medications,
        };
        self.render("peripheral_setup.html", &context(&page)?)
    }

    fn render_report<R: Serialize>(
        &self,
        template: &str,
        patient: Option<&PatientCase>,
        report: Option<&R>,
    ) -> Result<String, ExportError> {
        let page = ReportPage {
            disclaimer: DISCLAIMER,
            form: patient.into(),
            report,
        };
        self.render(template, &context(&page)?)
    }

    fn render(&self, template: &str, context: &Context) -> Result<String, ExportError> {
        let html = self.tera.render(template, context)?;
        tracing::debug!(template, bytes = html.len(), "page rendered");
        Ok(html)
    }
}

fn context<T: Serialize>(page: &T) -> Result<Context, ExportError> {
    let value = serde_json::to_value(page)?;
    Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))
}
