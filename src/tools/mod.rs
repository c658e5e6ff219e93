pub mod bill_text_tool;
pub mod senator_profile_tool;
