pub mod starrocks;
