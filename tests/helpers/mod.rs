#![allow(dead_code)]

pub mod mock_contact_repo;
