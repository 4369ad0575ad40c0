
mod flow_test;
mod login_test;
mod password_test;
mod verification_test;
