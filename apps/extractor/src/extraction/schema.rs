//! Target schemas for structured extraction.
//!
//! The workflow treats these as opaque records; only the extractor and the judge prompt
//! care about their shape. Absent lists default to empty, absent scalars to `None`.

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Resume
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub work_authorization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub primary_email: Option<String>,
    pub secondary_email: Option<String>,
    pub primary_phone_number: Option<String>,
    pub secondary_phone_number: Option<String>,
    pub country_code: Option<String>,
    pub current_city: Option<String>,
    pub current_state: Option<String>,
    pub current_country: Option<String>,
    pub postal_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationInfo {
    pub institution_name: Option<String>,
    /// University, College, School, Bootcamp, ...
    pub institution_type: Option<String>,
    pub institution_country: Option<String>,
    pub degree: Option<String>,
    pub field_of_study: Option<String>,
    pub specialisation: Option<String>,
    /// high_school / bachelors / masters / phd / diploma / bootcamp / certificate
    pub education_level: Option<String>,
    pub start_date: Option<String>,
    /// `None` while ongoing.
    pub end_date: Option<String>,
    pub is_current: Option<String>,
    pub grade_or_gpa: Option<String>,
    /// full_time, part_time, online, ...
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkExperienceInfo {
    pub company_name: Option<String>,
    pub company_location: Option<String>,
    pub job_title: Option<String>,
    pub employment_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub is_current_role: Option<String>,
    /// Brief summary of the role, at most ~200 words.
    pub role_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeSkills {
    pub programming_languages: Vec<String>,
    pub frameworks_and_libraries: Vec<String>,
    pub tools_and_platforms: Vec<String>,
    pub databases: Vec<String>,
    pub cloud_and_infra: Vec<String>,
    pub soft_skills: Vec<String>,
    pub domain_skills: Vec<String>,
    pub certified_skills: Vec<String>,
}

/// Structured candidate data extracted from a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub education_info: Vec<EducationInfo>,
    #[serde(default)]
    pub work_experience_info: Vec<WorkExperienceInfo>,
    #[serde(default)]
    pub skills_info: ResumeSkills,
}

// ────────────────────────────────────────────────────────────────────────────
// Job description
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MandatorySkills {
    pub programming_languages: Vec<String>,
    pub frameworks_and_libraries: Vec<String>,
    pub tools: Vec<String>,
    pub databases: Vec<String>,
    pub cloud_and_infra: Vec<String>,
}

/// Structured matching criteria extracted from a job description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    /// Standard job title, e.g. "Senior Backend Engineer".
    pub role_title: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default)]
    pub mandatory_skills: MandatorySkills,
    /// Skills listed as preferred, bonus or plus.
    #[serde(default)]
    pub optional_skills: Vec<String>,
    /// "5+ years" → 5
    #[serde(default)]
    pub min_years_experience: Option<u32>,
    #[serde(default)]
    pub degree_required: Option<String>,
    /// Top 3-5 core responsibilities.
    #[serde(default)]
    pub summary_responsibilities: Vec<String>,
}
