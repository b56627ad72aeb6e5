pub mod u501_zelle_reconcile;
