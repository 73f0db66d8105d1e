pub const EXTRACTION_SYSTEM: &str = "You are a resume parser. \
    You read the plain text of a resume and return the candidate's details as JSON. \
    Copy values exactly as they appear in the text. Never invent details.";

pub const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract the following fields from the resume text below.

Return a single JSON object with exactly these keys:
- "name": string or null
- "email": string or null
- "mobile_number": string or null
- "degree": array of strings (each degree as written, e.g. "B.Tech in Computer Science")
- "college_name": string or null
- "experience": array of strings (one entry per line of the work experience section)
- "skills": array of strings (technical and professional skills, no duplicates)
- "company_names": array of strings
- "designation": string or null (most recent job title)
- "total_experience": number or null (years of work experience)

Use null or an empty array when a field is not present.

Resume text:
---
{resume_text}
---"#;
