//! Instruction sent to the oracle.
//!
//! Callers can override it via [`crate::config::ParseConfig::system_prompt`].
//! Bump [`ORACLE_PROMPT_VERSION`] whenever the wording or the requested
//! output shape changes, so logged replies can be matched to the prompt that
//! produced them.

/// Version tag of [`ORACLE_EXTRACTION_PROMPT`].
pub const ORACLE_PROMPT_VERSION: &str = "vtu-results/2";

/// Default instruction for reading a result sheet into subject rows.
pub const ORACLE_EXTRACTION_PROMPT: &str = r#"You are an expert at reading VTU (Visvesvaraya Technological University) exam result sheets. The attached images are the pages of one result PDF.

Extract ONLY the following information for every subject listed:
1. Subject Code (e.g. BCS401, 21CS301)
2. Subject Name
3. Internal Marks
4. External Marks
5. Total Marks
6. Result (P/F/A/W/X/NE)

Ignore everything else: student details, dates, headers, footers, signatures.

Return the data as a JSON array of objects with exactly this shape:
[
    {
        "code": "BCS401",
        "name": "ANALYSIS & DESIGN OF ALGORITHMS",
        "internal": 49,
        "external": 36,
        "total": 85,
        "result": "P"
    }
]

If you cannot find any subjects, return an empty array [].
Be precise with the numbers and codes.
Return only the JSON array, with no commentary and no markdown fences."#;
