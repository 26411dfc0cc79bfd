// Prompt constants for structured extraction.
// Templates carry one placeholder each, replaced before sending.

/// System prompt for resume extraction.
pub const RESUME_SYSTEM: &str = r#"You are an expert AI Resume Parser & Data Extraction Specialist.
Your goal is to extract structured candidate data from raw Resume Markdown text with 100% precision.

CORE EXTRACTION RULES:
1. Truthfulness: extract ONLY what is explicitly stated in the text. Do not infer or hallucinate data. If a field is missing, use null. Do not invent "N/A" or placeholders.
2. Date normalization: convert all dates to YYYY-MM (e.g. "August 2022" -> "2022-08"). If the candidate writes "Present", "Current" or "Till Date", set end_date to null.
3. Names: if the header reads "Resume of John Doe", extract only "John Doe". Do not include titles like "Mr." or "Dr." or suffixes like "PMP" in full_name.
4. Work experience: split role and company when they share a line ("Software Engineer | Google" -> job_title "Software Engineer", company_name "Google"). Ignore "References available upon request".

EDGE CASES:
1. Multiple roles at the same company are separate work_experience_info objects.
2. Every university or college is a separate education_info object.
3. For current city, state and country use the current work location. If it is remote, infer them from previous work experiences; if still unknown, use null for all three."#;

/// Resume extraction prompt. Replace `{resume_markdown}` before sending.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Extract the candidate data from the resume below.

Return a JSON object with this EXACT schema (no extra fields, null where unknown):
{
  "personal_info": {
    "full_name": "", "first_name": "", "middle_name": null, "last_name": null,
    "date_of_birth": null, "gender": null, "nationality": null, "work_authorization": null
  },
  "contact_info": {
    "primary_email": null, "secondary_email": null, "primary_phone_number": null,
    "secondary_phone_number": null, "country_code": null, "current_city": null,
    "current_state": null, "current_country": null, "postal_address": null
  },
  "education_info": [
    {
      "institution_name": null, "institution_type": null, "institution_country": null,
      "degree": null, "field_of_study": null, "specialisation": null, "education_level": null,
      "start_date": null, "end_date": null, "is_current": null, "grade_or_gpa": null, "mode": null
    }
  ],
  "work_experience_info": [
    {
      "company_name": null, "company_location": null, "job_title": null, "employment_type": null,
      "start_date": null, "end_date": null, "is_current_role": null, "role_description": null
    }
  ],
  "skills_info": {
    "programming_languages": [], "frameworks_and_libraries": [], "tools_and_platforms": [],
    "databases": [], "cloud_and_infra": [], "soft_skills": [], "domain_skills": [], "certified_skills": []
  }
}

<resume_markdown>
{resume_markdown}
</resume_markdown>"#;

/// System prompt for job description extraction.
pub const JD_SYSTEM: &str = r#"You are a Technical Recruiter AI. Your job is to extract structured matching criteria from a messy Job Description.

INSTRUCTIONS:
1. Ignore the fluff: do not extract text from "About Us" or "Culture" sections unless it states a hard requirement (e.g. "Must work EST timezone").
2. Distinguish requirements:
   - "Required", "Must have", "Proficient in" -> mandatory_skills.
   - "Bonus", "Plus", "Good to have", "Familiarity with" -> optional_skills.
3. Skills are single keywords ("Python", "AWS", "React"), never sentences."#;

/// JD extraction prompt. Replace `{job_description_markdown}` before sending.
pub const JD_PROMPT_TEMPLATE: &str = r#"Extract the matching criteria from the job description below.

Return a JSON object with this EXACT schema (no extra fields, null where unknown):
{
  "role_title": "Senior Backend Engineer",
  "company_name": null,
  "salary_range": null,
  "mandatory_skills": {
    "programming_languages": [], "frameworks_and_libraries": [], "tools": [],
    "databases": [], "cloud_and_infra": []
  },
  "optional_skills": [],
  "min_years_experience": null,
  "degree_required": null,
  "summary_responsibilities": ["top 3-5 core responsibilities"]
}

<job_description>
{job_description_markdown}
</job_description>"#;
