mod document_intake_test;
mod template_service_test;
