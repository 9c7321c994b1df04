mod availability_test;
mod booking_test;
mod health_test;
mod mentor_test;
mod middleware_test;
