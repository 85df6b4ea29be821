// Prompt fragments for resume/job compatibility analysis.
// The rendered prompt is a single user message; the backend gets no separate system prompt.

/// Literal the backend must answer with when the upload is not a resume.
pub const NOT_A_RESUME_SENTINEL: &str = "NOT_A_RESUME";

const ROLE_FRAMING: &str = "\
You are an expert technical recruiter and HR analyst. \
Evaluate how well a candidate fits a job, based on their resume and the job description below.

CONSIDERATIONS:
- The resume may describe work experience, skills, education, projects and certifications.
- The job description lists requirements and desired skills.
- The assessment must be objective and based only on what both documents state.
- If the job description section is empty, assess the resume against the role it most plausibly targets.
";

const NOT_A_RESUME_INSTRUCTION: &str = "\
- If the document in the RESUME section is not a resume or CV, respond with exactly NOT_A_RESUME and nothing else.
";

const RESPONSE_SCHEMA: &str = r#"
Analyze compatibility based on experience, skills and education. Respond with valid JSON only,
no markdown code fences, no text outside the JSON object, using EXACTLY this shape:
{
  "compatibilityScore": 0-100 (integer),
  "matchingSkills": ["skill 1", "skill 2"],
  "missingSkills": ["missing skill 1", "missing skill 2"],
  "recommendations": ["recommendation 1", "recommendation 2"]
}
"#;

/// Renders the analysis prompt. Pure: same inputs always give the same output, and both
/// inputs appear verbatim.
///
/// Built by concatenation rather than placeholder substitution so that resume text
/// containing something like `{job_description}` is never re-expanded.
pub fn build_prompt(resume_text: &str, job_description: &str) -> String {
    let mut prompt = String::with_capacity(
        ROLE_FRAMING.len()
            + NOT_A_RESUME_INSTRUCTION.len()
            + RESPONSE_SCHEMA.len()
            + resume_text.len()
            + job_description.len()
            + 64,
    );
    prompt.push_str(ROLE_FRAMING);
    prompt.push_str(NOT_A_RESUME_INSTRUCTION);
    prompt.push_str("\nRESUME:\n");
    prompt.push_str(resume_text);
    prompt.push_str("\n\nJOB DESCRIPTION:\n");
    prompt.push_str(job_description);
    prompt.push('\n');
    prompt.push_str(RESPONSE_SCHEMA);
    prompt
}
