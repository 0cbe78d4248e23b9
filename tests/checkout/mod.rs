mod checkout_branch_with_untracked_files;
